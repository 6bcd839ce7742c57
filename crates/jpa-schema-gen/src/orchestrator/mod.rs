//! Schema generation orchestrator - main workflow coordinator.

use crate::classpath::ExecutionContext;
use crate::config::Config;
use crate::descriptor::{detect_version, select_unit, ModelCatalog};
use crate::error::Result;
use crate::generator::{self, properties, SchemaGenerator};
use crate::script;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Schema generation orchestrator.
pub struct Orchestrator<G> {
    config: Config,
    catalog: ModelCatalog,
    generator: G,
}

/// Result of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Unique run identifier.
    pub run_id: String,

    /// The persistence unit that was generated.
    pub unit: String,

    /// Descriptor version, when the descriptor was consulted.
    pub descriptor_version: Option<String>,

    /// Drop script path, when the script action produced one.
    pub drop_script: Option<PathBuf>,

    /// Create script path, when the script action produced one.
    pub create_script: Option<PathBuf>,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl GenerationResult {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Descriptor inspection summary for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorSummary {
    /// Descriptor file that was read.
    pub path: PathBuf,

    /// Detected version token.
    pub version: String,

    /// Declared unit names in document order.
    pub units: Vec<String>,
}

/// Detect the descriptor version and list its declared units.
pub fn declared_units(config: &Config, catalog: &ModelCatalog) -> Result<DescriptorSummary> {
    let path = config.descriptor_path();
    let version = detect_version(&path)?;
    info!(
        "Persistence descriptor {} has version {}",
        path.display(),
        version
    );
    let model = catalog.require_model(&version)?;
    let descriptor = model.load(&path)?;
    Ok(DescriptorSummary {
        path,
        version,
        units: descriptor.unit_names(),
    })
}

impl<G: SchemaGenerator> Orchestrator<G> {
    /// Create a new orchestrator with the built-in descriptor models.
    pub fn new(config: Config, generator: G) -> Self {
        Self {
            config,
            catalog: ModelCatalog::with_builtins(),
            generator,
        }
    }

    /// Replace the descriptor model catalog.
    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Resolve the target unit and, when the descriptor was read, its version.
    ///
    /// An explicit `persistence_unit` short-circuits descriptor access
    /// entirely; the name is handed to the generator as-is.
    fn resolve_unit(&self) -> Result<(String, Option<String>)> {
        if let Some(unit) = &self.config.persistence_unit {
            debug!("Explicit persistence unit selected: {unit}");
            return Ok((unit.clone(), None));
        }

        let summary = declared_units(&self.config, &self.catalog)?;
        let unit = select_unit(None, &summary.units, &summary.path)?;
        Ok((unit, Some(summary.version)))
    }

    /// Run the full generation pipeline.
    pub fn run(&self) -> Result<GenerationResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        let (unit, descriptor_version) = self.resolve_unit()?;
        info!("Generating schema for persistence unit '{unit}'");

        let drop_target = self.config.drop_target();
        let create_target = self.config.create_target();
        if let Some(parent) = create_target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let script = &self.config.script;
        let properties = properties::assemble(
            &self.config.database,
            script.action,
            &drop_target,
            &create_target,
            script.delimiter.as_deref(),
        )?;

        let context = ExecutionContext::build(&self.config.build);
        generator::invoke(&self.generator, &unit, &properties, Arc::new(context))?;

        if script.format {
            let delimiter = script
                .delimiter
                .as_deref()
                .unwrap_or(script::DEFAULT_DELIMITER);
            script::post_process(&[&create_target, &drop_target], delimiter)?;
        }

        let completed_at = Utc::now();
        let duration_seconds = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        Ok(GenerationResult {
            run_id,
            unit,
            descriptor_version,
            drop_script: existing(script.action.produces_drop(), drop_target),
            create_script: existing(script.action.produces_create(), create_target),
            started_at,
            completed_at,
            duration_seconds,
        })
    }
}

fn existing(expected: bool, path: PathBuf) -> Option<PathBuf> {
    (expected && path.exists()).then_some(path)
}
