//! jpa-schema-gen CLI - build-time JPA schema generation.

use clap::{Parser, Subcommand};
use jpa_schema_gen::{
    declared_units, Config, ModelCatalog, Orchestrator, ProcessGenerator, SchemaGenError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "jpa-schema-gen")]
#[command(about = "Build-time JPA persistence schema generation")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "schemagen.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run schema generation
    Generate {
        /// Override the persistence unit selection
        #[arg(long)]
        persistence_unit: Option<String>,

        /// Skip reformatting the emitted scripts
        #[arg(long)]
        no_format: bool,
    },

    /// Validate the configuration and descriptor without generating
    Validate,

    /// List the persistence units declared in the descriptor
    Units,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), SchemaGenError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(SchemaGenError::Config)?;

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Generate {
            persistence_unit,
            no_format,
        } => {
            // Apply overrides
            if let Some(unit) = persistence_unit {
                config.persistence_unit = Some(unit);
            }
            if no_format {
                config.script.format = false;
            }

            let generator_config = config.generator.clone().ok_or_else(|| {
                SchemaGenError::Config("generator.command is required for generate".to_string())
            })?;
            let generator = ProcessGenerator::from_config(&generator_config);

            let result = Orchestrator::new(config, generator).run()?;

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                println!("\nSchema generation completed!");
                println!("  Run ID: {}", result.run_id);
                println!("  Unit: {}", result.unit);
                if let Some(version) = &result.descriptor_version {
                    println!("  Descriptor version: {}", version);
                }
                if let Some(path) = &result.drop_script {
                    println!("  Drop script: {}", path.display());
                }
                if let Some(path) = &result.create_script {
                    println!("  Create script: {}", path.display());
                }
                println!("  Duration: {:.2}s", result.duration_seconds);
            }
        }

        Commands::Validate => {
            // Config::load already validated the file; check the descriptor
            // pipeline too unless an explicit unit bypasses it.
            if let Some(unit) = &config.persistence_unit {
                println!("Configuration OK (explicit persistence unit '{unit}')");
            } else {
                let summary = declared_units(&config, &ModelCatalog::with_builtins())?;
                jpa_schema_gen::select_unit(None, &summary.units, &summary.path)?;
                println!(
                    "Configuration OK (descriptor version {}, unit '{}')",
                    summary.version, summary.units[0]
                );
            }
        }

        Commands::Units => {
            let summary = declared_units(&config, &ModelCatalog::with_builtins())?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Descriptor: {} (version {})",
                    summary.path.display(),
                    summary.version
                );
                if summary.units.is_empty() {
                    println!("No persistence units declared");
                } else {
                    for unit in &summary.units {
                        println!("  {unit}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
