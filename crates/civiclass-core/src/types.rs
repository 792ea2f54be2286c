//! Core types for Civiclass

use serde::{Deserialize, Serialize};

/// Category name reported when no keyword matched at all
pub const UNCLASSIFIED: &str = "Unclassified";

/// Dispatch priority carried on a category
///
/// Priorities are routing metadata for downstream consumers; they play no
/// part in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A complaint category with its owning department and keyword set
///
/// Categories are immutable for the lifetime of the process once loaded
/// into a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique positive identifier
    pub id: i64,

    /// Human-readable label
    pub name: String,

    /// Short machine code, unique per category (e.g. "WATER-001")
    pub code: String,

    /// Owning department; not validated against a department registry here
    pub department_id: i64,

    /// Lowercase keyword phrases; order is preserved for matched-keyword
    /// reporting but does not affect scoring
    pub keywords: Vec<String>,

    /// Dispatch priority, carried through to consumers
    pub priority: Priority,
}

/// Outcome of classifying a single complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category, absent when no keyword matched
    pub category_id: Option<i64>,

    /// Winning category name, or `"Unclassified"`
    pub category_name: String,

    /// Confidence in [0.0, 1.0], rounded to 4 decimal digits
    pub confidence: f64,

    /// Department owning the winning category
    pub department_id: Option<i64>,

    /// Catalog keywords that matched, in catalog order and literal spelling
    pub keywords_matched: Vec<String>,

    /// True when confidence falls below the review threshold or nothing matched
    pub needs_manual_review: bool,
}

impl ClassificationResult {
    /// The result returned when no category keyword matched
    pub fn unclassified() -> Self {
        Self {
            category_id: None,
            category_name: UNCLASSIFIED.to_string(),
            confidence: 0.0,
            department_id: None,
            keywords_matched: Vec::new(),
            needs_manual_review: true,
        }
    }
}

/// A ranked category suggestion from the top-K similarity query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarCategory {
    /// Suggested category
    pub category_id: i64,

    /// Suggested category name
    pub category_name: String,

    /// Raw (unrounded) confidence for this suggestion
    pub confidence: f64,

    /// Catalog keywords that matched, in catalog order
    pub keywords_matched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclassified_result_shape() {
        let result = ClassificationResult::unclassified();
        assert_eq!(result.category_id, None);
        assert_eq!(result.category_name, "Unclassified");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.department_id, None);
        assert!(result.keywords_matched.is_empty());
        assert!(result.needs_manual_review);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }
}
