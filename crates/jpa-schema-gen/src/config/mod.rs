//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| crate::error::SchemaGenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Conventional descriptor location under the compiled-output directory.
    pub fn descriptor_path(&self) -> PathBuf {
        self.build
            .output_dir
            .join("META-INF")
            .join("persistence.xml")
    }

    /// Resolved drop script target path.
    pub fn drop_target(&self) -> PathBuf {
        self.script_output_dir().join(&self.script.drop_file)
    }

    /// Resolved create script target path.
    pub fn create_target(&self) -> PathBuf {
        self.script_output_dir().join(&self.script.create_file)
    }

    fn script_output_dir(&self) -> PathBuf {
        self.build.build_dir.join(&self.script.output_dir)
    }
}
