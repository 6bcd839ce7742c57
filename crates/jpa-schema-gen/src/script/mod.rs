//! In-place post-processing of emitted SQL scripts.

mod formatter;

pub use formatter::{format, DEFAULT_DELIMITER};

use crate::error::{Result, SchemaGenError};
use std::path::Path;
use tracing::debug;

/// Reformat each of the given target files in place.
///
/// A target that does not exist is skipped - the configured script action
/// may legitimately not have produced it. Any read or write failure aborts
/// the remaining post-processing.
pub fn post_process<P: AsRef<Path>>(targets: &[P], delimiter: &str) -> Result<()> {
    for target in targets {
        let path = target.as_ref();
        if !path.exists() {
            debug!("Skipping absent script: {}", path.display());
            continue;
        }
        reformat_file(path, delimiter)?;
        debug!("Reformatted script: {}", path.display());
    }
    Ok(())
}

fn reformat_file(path: &Path, delimiter: &str) -> Result<()> {
    let wrap = |source: std::io::Error| SchemaGenError::ScriptFormatting {
        path: path.to_path_buf(),
        source,
    };
    let raw = std::fs::read_to_string(path).map_err(wrap)?;
    std::fs::write(path, format(&raw, delimiter)).map_err(wrap)?;
    Ok(())
}
