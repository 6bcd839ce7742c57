//! Error types for the schema generation library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schema generation operations.
#[derive(Error, Debug)]
pub enum SchemaGenError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The persistence descriptor file does not exist
    #[error("Persistence descriptor not found: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// The persistence descriptor is not well-formed XML
    #[error("Persistence descriptor {path} is not well-formed: {message}")]
    DescriptorMalformed { path: PathBuf, message: String },

    /// The descriptor root element carries no version attribute
    #[error("Persistence descriptor {path} has no version attribute")]
    DescriptorVersionMissing { path: PathBuf },

    /// No extractor is registered for the detected descriptor version
    #[error("Unsupported persistence descriptor version '{version}' - no model is registered for it")]
    UnsupportedDescriptorVersion { version: String },

    /// The descriptor violates the structure expected by its version
    #[error("Failed to parse persistence descriptor {path}: {message}")]
    DescriptorParse { path: PathBuf, message: String },

    /// The descriptor declares no persistence units and none was selected
    #[error("No persistence units declared in {path}")]
    NoPersistenceUnits { path: PathBuf },

    /// More than one declared unit and no explicit selection
    #[error(
        "Found {count} persistence units - set 'persistence_unit' to select one explicitly"
    )]
    AmbiguousPersistenceUnits { count: usize },

    /// The external schema generator failed
    #[error("Schema generation failed for unit '{unit}'")]
    SchemaGeneration {
        unit: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reformatting an emitted SQL script failed
    #[error("Error formatting SQL script {path}")]
    ScriptFormatting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaGenError {
    /// Create a DescriptorMalformed error from any parse-level cause.
    pub fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        SchemaGenError::DescriptorMalformed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a DescriptorParse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        SchemaGenError::DescriptorParse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Map each failure category to a distinct process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            SchemaGenError::Config(_) => 2,
            SchemaGenError::DescriptorNotFound { .. } => 3,
            SchemaGenError::DescriptorMalformed { .. } => 4,
            SchemaGenError::DescriptorVersionMissing { .. } => 5,
            SchemaGenError::UnsupportedDescriptorVersion { .. } => 6,
            SchemaGenError::DescriptorParse { .. } => 7,
            SchemaGenError::NoPersistenceUnits { .. } => 8,
            SchemaGenError::AmbiguousPersistenceUnits { .. } => 9,
            SchemaGenError::SchemaGeneration { .. } => 10,
            SchemaGenError::ScriptFormatting { .. } => 11,
            SchemaGenError::Io(_) => 12,
            SchemaGenError::Json(_) => 13,
        }
    }
}

/// Result type alias for schema generation operations.
pub type Result<T> = std::result::Result<T, SchemaGenError>;
