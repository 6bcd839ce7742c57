//! Persistence descriptor handling.
//!
//! The descriptor pipeline has three stages with distinct failure modes:
//!
//! 1. [`detect_version`] reads only the root element's version attribute.
//! 2. [`ModelCatalog`] dispatches the token to a registered
//!    [`PersistenceModel`].
//! 3. The model fully parses the file; [`select_unit`] then applies the
//!    single-unit-or-explicit-selection invariant.

mod catalog;
mod model;
mod selector;
mod v2_1;
mod version;

pub use catalog::ModelCatalog;
pub use model::{PersistenceDescriptor, PersistenceModel, PersistenceUnit};
pub use selector::select_unit;
pub use v2_1::Model21;
pub use version::detect_version;
