//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit persistence unit selection. When set, the descriptor is
    /// not consulted and this name is passed through to the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence_unit: Option<String>,

    /// Target database hints.
    pub database: DatabaseConfig,

    /// Script action, output paths and formatting behavior.
    #[serde(default)]
    pub script: ScriptConfig,

    /// Build environment supplied by the host build tool.
    pub build: BuildConfig,

    /// External schema generator invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorConfig>,
}

/// Database targeting hints passed verbatim to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database product name (e.g., "PostgreSQL").
    pub product_name: String,

    /// Database major version (default: empty).
    #[serde(default)]
    pub major_version: String,

    /// Database minor version (default: empty).
    #[serde(default)]
    pub minor_version: String,
}

/// Script output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Which scripts to produce (default: drop-and-create).
    #[serde(default)]
    pub action: ScriptAction,

    /// Output directory, resolved under the build directory (default: "generated-schema").
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Drop script file name (default: "drop.sql").
    #[serde(default = "default_drop_file")]
    pub drop_file: String,

    /// Create script file name (default: "create.sql").
    #[serde(default = "default_create_file")]
    pub create_file: String,

    /// Statement delimiter override passed to the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Reformat emitted scripts in place after generation (default: true).
    #[serde(default = "default_true")]
    pub format: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            action: ScriptAction::default(),
            output_dir: default_output_dir(),
            drop_file: default_drop_file(),
            create_file: default_create_file(),
            delimiter: None,
            format: default_true(),
        }
    }
}

/// Script action controlling which output files are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptAction {
    /// Generate no scripts.
    None,

    /// Generate only the create script.
    Create,

    /// Generate only the drop script.
    Drop,

    /// Generate both drop and create scripts.
    #[default]
    DropAndCreate,
}

impl ScriptAction {
    /// The property value understood by the external generator.
    pub fn as_property_value(&self) -> &'static str {
        match self {
            ScriptAction::None => "none",
            ScriptAction::Create => "create",
            ScriptAction::Drop => "drop",
            ScriptAction::DropAndCreate => "drop-and-create",
        }
    }

    /// Whether this action emits a drop script.
    pub fn produces_drop(&self) -> bool {
        matches!(self, ScriptAction::Drop | ScriptAction::DropAndCreate)
    }

    /// Whether this action emits a create script.
    pub fn produces_create(&self) -> bool {
        matches!(self, ScriptAction::Create | ScriptAction::DropAndCreate)
    }
}

/// Build environment data supplied by the host build tool.
///
/// The orchestrator does no build introspection of its own; the host is
/// expected to hand over its output directory and resolved dependency
/// locations, each dependency tagged with its scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build directory the script output directory is resolved under (default: "target").
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Compiled-output directory; the descriptor is looked up beneath it.
    pub output_dir: PathBuf,

    /// Resolved compile-scope classpath locations, in resolution order.
    #[serde(default)]
    pub compile_classpath: Vec<PathBuf>,

    /// Resolved runtime-scope classpath locations, in resolution order.
    #[serde(default)]
    pub runtime_classpath: Vec<PathBuf>,

    /// Declared dependency artifacts with their scopes.
    #[serde(default)]
    pub dependencies: Vec<DependencyArtifact>,
}

/// A single dependency artifact with its scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyArtifact {
    /// Location of the artifact (directory or archive).
    pub path: PathBuf,

    /// Dependency scope (default: compile). Test-scoped artifacts are
    /// excluded from the execution context.
    #[serde(default)]
    pub scope: ArtifactScope,
}

/// Dependency scope tags recognized by the context builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactScope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
}

/// External schema generator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Program to invoke.
    pub command: String,

    /// Extra arguments placed before the unit name and properties path.
    #[serde(default)]
    pub args: Vec<String>,
}

// Default value functions for serde

fn default_output_dir() -> String {
    "generated-schema".to_string()
}

fn default_drop_file() -> String {
    "drop.sql".to_string()
}

fn default_create_file() -> String {
    "create.sql".to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("target")
}

fn default_true() -> bool {
    true
}
