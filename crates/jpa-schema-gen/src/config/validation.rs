//! Configuration validation.

use super::Config;
use crate::error::{Result, SchemaGenError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.database.product_name.is_empty() {
        return Err(SchemaGenError::Config(
            "database.product_name is required".into(),
        ));
    }

    if config.script.output_dir.is_empty() {
        return Err(SchemaGenError::Config(
            "script.output_dir must not be empty".into(),
        ));
    }
    if config.script.drop_file.is_empty() {
        return Err(SchemaGenError::Config(
            "script.drop_file must not be empty".into(),
        ));
    }
    if config.script.create_file.is_empty() {
        return Err(SchemaGenError::Config(
            "script.create_file must not be empty".into(),
        ));
    }
    if let Some(delimiter) = &config.script.delimiter {
        if delimiter.is_empty() {
            return Err(SchemaGenError::Config(
                "script.delimiter must not be empty when set".into(),
            ));
        }
    }

    if config.build.output_dir.as_os_str().is_empty() {
        return Err(SchemaGenError::Config(
            "build.output_dir is required".into(),
        ));
    }

    if let Some(unit) = &config.persistence_unit {
        if unit.is_empty() {
            return Err(SchemaGenError::Config(
                "persistence_unit must not be empty when set".into(),
            ));
        }
    }

    if let Some(generator) = &config.generator {
        if generator.command.is_empty() {
            return Err(SchemaGenError::Config(
                "generator.command must not be empty".into(),
            ));
        }
    }

    Ok(())
}
