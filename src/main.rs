//! bfi-assess - BFI personality assessment harness
//!
//! Interviews simulated persona agents with the Big-Five Inventory,
//! scores every answer per trait dimension through a scorer collaborator,
//! aggregates to a mean per dimension, and evaluates hit@k against each
//! persona's expected scores. The batch result is written once at the end
//! of the run.

mod aliases;
mod assessment;
mod backend;
mod cli;
mod config;
mod error;
mod logging;
mod store;
mod types;
mod version;

use std::path::Path;

use clap::Parser;
use tracing::info;

use crate::aliases::AliasTable;
use crate::assessment::{BatchRunner, RunnerConfig};
use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::config::AssessConfig;
use crate::error::{Error, Result};

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            let _ = logging::init_simple(tracing::Level::WARN);
            handle_config_command(subcommand)
        }
        Commands::Run {
            config,
            personas,
            questionnaire,
            output,
            character,
            persona_index,
            sample_size,
            tolerance,
            seed,
            backend,
        } => run_command(RunOverrides {
            config_path: config,
            personas,
            questionnaire,
            output,
            character,
            persona_index,
            sample_size,
            tolerance,
            seed,
            backend,
            verbose: cli.verbose,
            quiet: cli.quiet,
        }),
    };

    if let Err(e) = outcome {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

/// CLI-level overrides for a run, applied over the loaded configuration.
struct RunOverrides {
    config_path: Option<String>,
    personas: Option<String>,
    questionnaire: Option<String>,
    output: Option<String>,
    character: Option<String>,
    persona_index: Option<usize>,
    sample_size: Option<usize>,
    tolerance: Option<u32>,
    seed: Option<u64>,
    backend: Option<String>,
    verbose: u8,
    quiet: bool,
}

/// Load config, apply overrides, and run the batch assessment.
fn run_command(overrides: RunOverrides) -> Result<()> {
    let mut config = AssessConfig::load(overrides.config_path.as_deref().map(Path::new))?;

    if let Some(path) = overrides.personas {
        config.storage.personas_path = path;
    }
    if let Some(path) = overrides.questionnaire {
        config.storage.questionnaire_path = path;
    }
    if let Some(path) = overrides.output {
        config.storage.output_path = path;
    }
    if let Some(n) = overrides.sample_size {
        config.assessment.sample_size = Some(n);
    }
    if let Some(k) = overrides.tolerance {
        config.assessment.tolerance_k = k;
    }
    if let Some(seed) = overrides.seed {
        config.assessment.seed = seed;
    }
    if let Some(kind) = overrides.backend {
        config.generator.backend = kind.clone();
        config.scorer.backend = kind;
    }
    config.validate()?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, overrides.verbose, overrides.quiet)?;

    let build = version::build_info();
    info!(version = %build.full_version(), "Starting bfi-assess");

    // Collaborators are blocking network calls processed one at a time;
    // a single-threaded runtime is all the pipeline needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(run_assessment(
        config,
        overrides.character,
        overrides.persona_index,
    ))
}

/// The async run: load documents, assemble the pipeline, write results.
async fn run_assessment(
    config: AssessConfig,
    character: Option<String>,
    persona_index: Option<usize>,
) -> Result<()> {
    let questionnaire = store::load_questionnaire(Path::new(&config.storage.questionnaire_path))?;
    let mut personas = store::load_personas(Path::new(&config.storage.personas_path))?;

    info!(
        questions = questionnaire.len(),
        personas = personas.len(),
        "Input documents loaded"
    );

    if let Some(ref name) = character {
        let canonical = resolve_character(&config, name)?;
        personas.retain(|p| p.name() == canonical);
        if personas.is_empty() {
            return Err(Error::UnknownCharacter {
                name: canonical.clone(),
            });
        }
        info!(character = %canonical, "Assessing a single character");
    }

    if let Some(index) = persona_index {
        personas = vec![store::persona_by_index(&personas, index)?.clone()];
        info!(index, persona = %personas[0].name(), "Assessing a single persona by index");
    }

    let generator = backend::build_generator(&config.generator)?;
    let scorer = backend::build_scorer(&config.scorer)?;
    info!(
        generator = generator.name(),
        scorer = scorer.name(),
        "Collaborator backends ready"
    );

    let runner = BatchRunner::new(
        generator,
        scorer,
        RunnerConfig {
            tolerance_k: config.assessment.tolerance_k,
            sample_size: config.assessment.sample_size,
            seed: config.assessment.seed,
            skip_failed: config.assessment.skip_failed,
        },
    );

    let results = runner.run(&personas, &questionnaire).await?;

    store::write_results(Path::new(&config.storage.output_path), &results)?;
    print_summary(&results, config.assessment.tolerance_k);

    Ok(())
}

/// Resolve a character name through the alias table if one is configured;
/// otherwise take the name as-is.
fn resolve_character(config: &AssessConfig, name: &str) -> Result<String> {
    match config.storage.characters_path {
        Some(ref path) => {
            let table = AliasTable::load(Path::new(path))?;
            Ok(table.resolve(name)?.to_string())
        }
        None => Ok(name.to_string()),
    }
}

/// Print a human-readable batch summary to stdout.
fn print_summary(results: &types::BatchResult, tolerance_k: u32) {
    let total_dims: usize = results.values().map(|r| r.hit_at_k.len()).sum();
    let hit_dims: usize = results
        .values()
        .map(|r| r.hit_at_k.values().filter(|hit| **hit).count())
        .sum();

    println!();
    println!("Assessment complete ({} personas):", results.len());
    if total_dims > 0 {
        println!(
            "  hit@{}: {}/{} dimensions ({:.1}%)",
            tolerance_k,
            hit_dims,
            total_dims,
            100.0 * hit_dims as f64 / total_dims as f64
        );
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = AssessConfig::load(config.as_deref().map(Path::new))?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            config::init_config(path.as_deref().map(Path::new), force)?;
        }
        ConfigSubcommand::Validate { config } => {
            AssessConfig::load(config.as_deref().map(Path::new))?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
