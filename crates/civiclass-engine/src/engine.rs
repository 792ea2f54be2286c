//! Classification engine
//!
//! Orchestrates normalization and scoring, applies the manual-review
//! threshold, and exposes the top-K similarity query. Both operations are
//! total functions of their inputs over a fixed catalog; neither fails for
//! any string input.

use crate::catalog::CategoryCatalog;
use crate::normalize::normalize;
use crate::scorer::KeywordScorer;
use civiclass_core::{ClassificationResult, Result, SimilarCategory};
use std::sync::Arc;

/// Confidence below which a decision is flagged for manual review
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.75;

/// The complaint classification engine
///
/// Read-only after construction; a single instance is shared between the
/// synchronous request path and the event pipeline.
pub struct ClassificationEngine {
    catalog: Arc<CategoryCatalog>,
    scorer: KeywordScorer,
    review_threshold: f64,
}

impl ClassificationEngine {
    /// Build an engine with the default review threshold
    pub fn new(catalog: CategoryCatalog) -> Result<Self> {
        Self::with_threshold(catalog, DEFAULT_REVIEW_THRESHOLD)
    }

    /// Build an engine with a custom review threshold
    pub fn with_threshold(catalog: CategoryCatalog, review_threshold: f64) -> Result<Self> {
        let catalog = Arc::new(catalog);
        let scorer = KeywordScorer::new(Arc::clone(&catalog))?;

        Ok(Self {
            catalog,
            scorer,
            review_threshold,
        })
    }

    /// The catalog this engine classifies against
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Classify a complaint
    ///
    /// Title and text are scored together (title first, single separating
    /// space) so a keyword appearing only in the title still contributes.
    /// Returns the Unclassified result when no keyword matches anywhere.
    /// Output confidence is rounded to 4 decimal digits; the review
    /// threshold is compared at full precision.
    pub fn classify(&self, text: &str, title: &str) -> ClassificationResult {
        let combined = format!("{title} {text}");
        let normalized = normalize(&combined);

        let mut ranked = self.scorer.score(&normalized);
        if ranked.is_empty() {
            return ClassificationResult::unclassified();
        }
        let top = ranked.swap_remove(0);
        let category = &self.catalog.categories()[top.index];

        ClassificationResult {
            category_id: Some(category.id),
            category_name: category.name.clone(),
            confidence: round4(top.confidence),
            department_id: Some(category.department_id),
            keywords_matched: top.keywords_matched,
            needs_manual_review: top.confidence < self.review_threshold,
        }
    }

    /// Top-K category suggestions for a piece of text
    ///
    /// Runs the same scoring pipeline over the text alone (no title) and
    /// truncates to the first `k` ranked entries. Meant for suggestion UIs,
    /// not for the authoritative decision; confidences are unrounded.
    pub fn top_similar(&self, text: &str, k: usize) -> Vec<SimilarCategory> {
        let normalized = normalize(text);

        self.scorer
            .score(&normalized)
            .into_iter()
            .take(k)
            .map(|m| {
                let category = &self.catalog.categories()[m.index];
                SimilarCategory {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    confidence: m.confidence,
                    keywords_matched: m.keywords_matched,
                }
            })
            .collect()
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
