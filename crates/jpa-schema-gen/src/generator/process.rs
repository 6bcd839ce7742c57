//! Child-process adapter for the external schema generator.
//!
//! The facility itself is an external capability: it receives the target
//! unit name and the assembled property map, and writes the SQL scripts as
//! a side effect. This adapter hands both over to a configured command, the
//! properties as a JSON file path appended after the unit name.

use super::invoker::{GeneratorError, SchemaGenerator};
use super::properties::GenerationProperties;
use crate::config::GeneratorConfig;
use std::process::Command;
use tracing::debug;

/// Schema generator backed by an external command.
///
/// Invocation shape: `<command> <args...> <unit> <properties.json>`.
/// A non-zero exit status is a generation failure carrying the child's
/// stderr.
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    command: String,
    args: Vec<String>,
}

impl ProcessGenerator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl SchemaGenerator for ProcessGenerator {
    fn generate_schema(
        &self,
        unit: &str,
        properties: &GenerationProperties,
    ) -> std::result::Result<(), GeneratorError> {
        let properties_path = std::env::temp_dir().join(format!(
            "schemagen-properties-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&properties_path, serde_json::to_vec_pretty(properties)?)?;

        debug!(
            "Spawning generator: {} {:?} {} {}",
            self.command,
            self.args,
            unit,
            properties_path.display()
        );
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(unit)
            .arg(&properties_path)
            .output();

        // The properties file is only needed for the child's lifetime.
        let _ = std::fs::remove_file(&properties_path);

        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "generator command '{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )
            .into());
        }
        Ok(())
    }
}
