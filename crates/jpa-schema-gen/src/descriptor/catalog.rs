//! Versioned descriptor model catalog.
//!
//! The [`ModelCatalog`] maps descriptor version tokens to parsing models.
//! It is explicitly constructed and injected into the orchestrator rather
//! than living behind a global singleton, which keeps initialization order
//! deterministic and makes catalogs trivial to mock in tests. Supporting a
//! new descriptor version is a registration, not an edit to lookup code.

use super::model::PersistenceModel;
use super::v2_1::Model21;
use crate::error::{Result, SchemaGenError};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of descriptor models by version token.
#[derive(Default)]
pub struct ModelCatalog {
    models: HashMap<String, Arc<dyn PersistenceModel>>,
}

impl ModelCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the standard built-in models registered.
    ///
    /// Currently registers the 2.1 descriptor model.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register(Arc::new(Model21::new()));
        catalog
    }

    /// Register a model under its own version token.
    ///
    /// A later registration for the same token replaces the earlier one.
    pub fn register(&mut self, model: Arc<dyn PersistenceModel>) {
        self.models.insert(model.version().to_string(), model);
    }

    /// Look up the model for a detected version token.
    pub fn require_model(&self, version: &str) -> Result<Arc<dyn PersistenceModel>> {
        self.models.get(version).cloned().ok_or_else(|| {
            SchemaGenError::UnsupportedDescriptorVersion {
                version: version.to_string(),
            }
        })
    }

    /// Registered version tokens, sorted.
    pub fn supported_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self.models.keys().cloned().collect();
        versions.sort();
        versions
    }
}
