//! Persistence unit selection.

use crate::error::{Result, SchemaGenError};
use std::path::Path;

/// Resolve the target persistence unit name.
///
/// An explicit selection is returned unchanged without checking membership
/// in the declared list; the external generator rejects unknown units
/// itself, and units resolvable from merged or inherited descriptors may
/// not appear in this one. Without an explicit selection, exactly one
/// declared unit must exist.
pub fn select_unit(
    explicit: Option<&str>,
    declared: &[String],
    descriptor_path: &Path,
) -> Result<String> {
    if let Some(unit) = explicit {
        return Ok(unit.to_string());
    }

    match declared.len() {
        0 => Err(SchemaGenError::NoPersistenceUnits {
            path: descriptor_path.to_path_buf(),
        }),
        1 => Ok(declared[0].clone()),
        count => Err(SchemaGenError::AmbiguousPersistenceUnits { count }),
    }
}
