//! Keyword scoring
//!
//! Each category is scored independently by substring containment of its
//! keywords in the normalized text. Matching is deliberately not
//! word-bounded ("light" matches inside "lighting"); that approximation is
//! part of the engine's observable contract.

use crate::catalog::CategoryCatalog;
use aho_corasick::AhoCorasick;
use civiclass_core::{Error, Result};
use std::sync::Arc;

/// Boost applied when two or more keywords of one category match
const MULTI_KEYWORD_BOOST: f64 = 1.3;

/// Ceiling for boosted confidence; 1.0 is reserved for an unboosted full
/// match of a single-keyword category
const BOOST_CAP: f64 = 0.95;

/// One category's score against a piece of text
#[derive(Debug, Clone)]
pub struct CategoryMatch {
    /// Index of the category in the catalog
    pub index: usize,

    /// Confidence in [0.0, 1.0], full precision
    pub confidence: f64,

    /// Keywords that matched, in catalog order and literal spelling
    pub keywords_matched: Vec<String>,
}

/// Substring keyword scorer over a fixed catalog
///
/// Builds one case-insensitive Aho-Corasick automaton per category at
/// construction; scoring itself never fails.
pub struct KeywordScorer {
    catalog: Arc<CategoryCatalog>,
    matchers: Vec<AhoCorasick>,
}

impl KeywordScorer {
    /// Build a scorer for the given catalog
    pub fn new(catalog: Arc<CategoryCatalog>) -> Result<Self> {
        let mut matchers = Vec::with_capacity(catalog.len());

        for category in catalog.categories() {
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&category.keywords)
                .map_err(|e| {
                    Error::engine(format!(
                        "failed to build keyword matcher for '{}': {}",
                        category.code, e
                    ))
                })?;
            matchers.push(matcher);
        }

        Ok(Self { catalog, matchers })
    }

    /// Score normalized text against every category
    ///
    /// Returns one entry per category with at least one keyword hit, ranked
    /// descending by confidence. The sort is stable, so categories with
    /// equal confidence keep their catalog order.
    pub fn score(&self, normalized_text: &str) -> Vec<CategoryMatch> {
        let mut matches = Vec::new();

        for (index, category) in self.catalog.categories().iter().enumerate() {
            // Overlapping search: "no water" must not hide the "water" hit
            // contained inside it.
            let mut hit = vec![false; category.keywords.len()];
            for m in self.matchers[index].find_overlapping_iter(normalized_text) {
                hit[m.pattern().as_usize()] = true;
            }

            let keywords_matched: Vec<String> = category
                .keywords
                .iter()
                .zip(&hit)
                .filter(|(_, matched)| **matched)
                .map(|(keyword, _)| keyword.clone())
                .collect();

            let count = keywords_matched.len();
            if count == 0 {
                continue;
            }

            let mut confidence = (count as f64 / category.keywords.len() as f64).min(1.0);
            if count >= 2 {
                confidence = (confidence * MULTI_KEYWORD_BOOST).min(BOOST_CAP);
            }

            matches.push(CategoryMatch {
                index,
                confidence,
                keywords_matched,
            });
        }

        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }
}
