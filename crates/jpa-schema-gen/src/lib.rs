//! # jpa-schema-gen
//!
//! Build-time schema generation orchestrator for JPA persistence units.
//!
//! Given a project's persistence descriptor, this library resolves which
//! named persistence unit to target, assembles an isolated execution
//! context able to see the project's compiled classes and dependencies,
//! invokes an external schema-generation facility with a normalized
//! property set, and optionally reformats the emitted SQL scripts:
//!
//! - **Version dispatch**: descriptor version detection plus a pluggable
//!   model catalog (2.1 built in)
//! - **Unit selection**: single-unit-or-explicit-selection invariant
//! - **Context isolation**: scoped swap of the active resolution context
//!   with guaranteed restoration
//! - **Script post-processing**: deterministic, idempotent DDL formatting
//!
//! The pipeline is single-threaded, synchronous and blocking. Concurrent
//! invocations against the same target files are unsupported; callers are
//! responsible for serializing them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jpa_schema_gen::{Config, Orchestrator, ProcessGenerator};
//!
//! fn main() -> Result<(), jpa_schema_gen::SchemaGenError> {
//!     let config = Config::load("schemagen.yaml")?;
//!     let generator = ProcessGenerator::new("jpa-ddl-gen", vec![]);
//!     let result = Orchestrator::new(config, generator).run()?;
//!     println!("Generated schema for unit {}", result.unit);
//!     Ok(())
//! }
//! ```

pub mod classpath;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod script;

// Re-exports for convenient access
pub use classpath::{ClasspathElement, ExecutionContext};
pub use config::{Config, DatabaseConfig, ScriptAction};
pub use descriptor::{detect_version, select_unit, ModelCatalog, PersistenceModel};
pub use error::{Result, SchemaGenError};
pub use generator::{GenerationProperties, ProcessGenerator, SchemaGenerator};
pub use orchestrator::{declared_units, DescriptorSummary, GenerationResult, Orchestrator};
