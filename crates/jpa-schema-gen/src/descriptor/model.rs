//! Parsed descriptor representation and the per-version model seam.

use crate::error::Result;
use std::path::Path;

/// Parsed representation of one persistence descriptor.
///
/// Constructed fresh per invocation and discarded once the unit names have
/// been extracted; never cached across invocations.
#[derive(Debug, Clone)]
pub struct PersistenceDescriptor {
    /// Version token the descriptor declares.
    pub version: String,

    /// Declared units in document order.
    pub units: Vec<PersistenceUnit>,
}

impl PersistenceDescriptor {
    /// Declared unit names in document order.
    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.name.clone()).collect()
    }
}

/// A single declared persistence unit.
#[derive(Debug, Clone, Default)]
pub struct PersistenceUnit {
    /// Unique unit name.
    pub name: String,

    /// Declared transaction type, if any.
    pub transaction_type: Option<String>,

    /// Declared provider class, if any.
    pub provider: Option<String>,

    /// Explicitly listed managed classes, in document order.
    pub classes: Vec<String>,
}

/// Parse a descriptor of one specific version.
///
/// Each implementation binds to exactly one version token; the
/// [`ModelCatalog`](super::ModelCatalog) dispatches on the detected token.
pub trait PersistenceModel: Send + Sync + std::fmt::Debug {
    /// The descriptor version this model handles.
    fn version(&self) -> &'static str;

    /// Fully parse the descriptor at `path`.
    ///
    /// Zero declared units is a valid result; structural violations of this
    /// version's expected shape are a `DescriptorParse` error.
    fn load(&self, path: &Path) -> Result<PersistenceDescriptor>;
}
