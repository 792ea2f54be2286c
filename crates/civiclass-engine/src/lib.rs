//! Civiclass Engine
//!
//! Keyword-based complaint classification: an immutable category catalog,
//! ASCII text normalization, substring keyword scoring with a
//! multi-keyword confidence boost, and manual-review thresholding.
//!
//! The engine is deterministic and read-only after construction, so one
//! instance serves concurrent callers without locking.

pub mod catalog;
pub mod engine;
pub mod normalize;
pub mod scorer;

pub use catalog::CategoryCatalog;
pub use engine::{ClassificationEngine, DEFAULT_REVIEW_THRESHOLD};
pub use normalize::normalize;
pub use scorer::{CategoryMatch, KeywordScorer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::CategoryCatalog;
    pub use crate::engine::{ClassificationEngine, DEFAULT_REVIEW_THRESHOLD};
    pub use crate::normalize::normalize;
    pub use crate::scorer::KeywordScorer;
}
