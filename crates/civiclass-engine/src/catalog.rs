//! Category catalog loading and validation
//!
//! The catalog is loaded once at process start and never mutated; both the
//! synchronous request path and the event pipeline read it concurrently
//! without locking.

use civiclass_core::{Category, Error, Priority, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Immutable set of complaint categories available to the classifier
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

/// On-disk catalog file layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Create a catalog from category definitions
    ///
    /// Validates that ids and codes are unique and every category carries at
    /// least one non-empty keyword. The same keyword may appear in multiple
    /// categories ("water" belongs to both leakage and supply).
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        for (i, category) in categories.iter().enumerate() {
            if category.id <= 0 {
                return Err(Error::catalog(format!(
                    "category '{}' has non-positive id {}",
                    category.name, category.id
                )));
            }
            if category.keywords.is_empty() {
                return Err(Error::catalog(format!(
                    "category '{}' has an empty keyword set",
                    category.name
                )));
            }
            if category.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::catalog(format!(
                    "category '{}' contains an empty keyword",
                    category.name
                )));
            }
            for earlier in &categories[..i] {
                if earlier.id == category.id {
                    return Err(Error::catalog(format!("duplicate category id {}", category.id)));
                }
                if earlier.code == category.code {
                    return Err(Error::catalog(format!("duplicate category code '{}'", category.code)));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Load a catalog from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_yaml::from_str(&content)
            .map_err(|e| Error::catalog(format!("failed to parse {}: {}", path.display(), e)))?;

        let catalog = Self::new(file.categories)?;
        info!(
            path = %path.display(),
            categories = catalog.len(),
            "loaded category catalog"
        );
        Ok(catalog)
    }

    /// The stock civic catalog shipped with the service
    ///
    /// Used when no catalog file is configured.
    pub fn builtin() -> Self {
        let categories = vec![
            category(1, "Streetlight Not Working", "LIGHT-001", 1, Priority::Medium,
                &["streetlight", "street light", "light", "bulb", "dark", "night", "lamp post"]),
            category(2, "Power Outage", "POWER-001", 1, Priority::High,
                &["power", "electricity", "outage", "blackout", "supply", "current", "voltage"]),
            category(3, "Water Leakage", "WATER-001", 2, Priority::High,
                &["water", "leak", "leakage", "pipe", "burst", "overflow", "dripping"]),
            category(4, "No Water Supply", "WATER-002", 2, Priority::High,
                &["water", "supply", "tap", "shortage", "no water", "dry"]),
            category(5, "Pothole on Road", "ROAD-001", 3, Priority::Medium,
                &["pothole", "road", "damage", "crater", "hole", "damaged road"]),
            category(6, "Garbage Not Collected", "GARB-001", 4, Priority::Medium,
                &["garbage", "waste", "trash", "collection", "not collected", "rubbish"]),
            category(7, "Overflowing Dustbin", "GARB-002", 4, Priority::Low,
                &["dustbin", "overflow", "bin", "full", "overflowing"]),
            category(8, "Stray Animals", "HEALTH-001", 5, Priority::Medium,
                &["dog", "stray", "animal", "bite", "dogs", "animals"]),
            category(9, "Mosquito Menace", "HEALTH-002", 5, Priority::Medium,
                &["mosquito", "dengue", "malaria", "insect", "mosquitoes", "breeding"]),
            category(10, "Illegal Parking", "POLICE-001", 6, Priority::Low,
                &["parking", "illegal", "vehicle", "block", "parked", "blocking"]),
            category(11, "Noise Pollution", "ENV-001", 8, Priority::Low,
                &["noise", "sound", "loud", "pollution", "disturbance"]),
            category(12, "Tree Fallen", "ENV-002", 8, Priority::High,
                &["tree", "fallen", "branch", "blocking", "fell", "collapse"]),
        ];

        Self { categories }
    }

    /// All categories in catalog order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn category(
    id: i64,
    name: &str,
    code: &str,
    department_id: i64,
    priority: Priority,
    keywords: &[&str],
) -> Category {
    Category {
        id,
        name: name.to_string(),
        code: code.to_string(),
        department_id,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        priority,
    }
}
