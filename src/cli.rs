//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the BFI assessment harness.

use clap::{Parser, Subcommand};

/// bfi-assess - BFI personality assessment for simulated persona agents
///
/// Interviews each persona with the Big-Five Inventory questionnaire,
/// scores the answers per trait dimension, and checks the aggregated
/// scores against the persona's expected values within a tolerance.
#[derive(Parser, Debug)]
#[command(name = "bfi-assess")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a batch assessment over the persona set
    Run {
        /// Path to configuration file
        #[arg(short, long, env = "BFI_ASSESS_CONFIG")]
        config: Option<String>,

        /// Persona set JSON document (overrides config)
        #[arg(long)]
        personas: Option<String>,

        /// Questionnaire JSON document (overrides config)
        #[arg(long)]
        questionnaire: Option<String>,

        /// Output path for the batch result JSON (overrides config)
        #[arg(short, long)]
        output: Option<String>,

        /// Assess a single character by name or alias
        #[arg(long)]
        character: Option<String>,

        /// Assess only the persona at this index in the set
        #[arg(long, conflicts_with = "character")]
        persona_index: Option<usize>,

        /// Assess a uniform random sample of this many personas
        #[arg(long)]
        sample_size: Option<usize>,

        /// hit@k tolerance (hit iff |expected - mean| <= k)
        #[arg(short = 'k', long)]
        tolerance: Option<u32>,

        /// Seed for deterministic persona sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Backend for both collaborators: openai or mock
        #[arg(long)]
        backend: Option<String>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verifies that the CLI definition is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["bfi-assess", "run"]);
        match cli.command {
            Commands::Run {
                config,
                character,
                sample_size,
                tolerance,
                seed,
                ..
            } => {
                assert!(config.is_none());
                assert!(character.is_none());
                assert!(sample_size.is_none());
                assert!(tolerance.is_none());
                assert!(seed.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_with_options() {
        let cli = Cli::parse_from([
            "bfi-assess",
            "run",
            "--personas",
            "personas.json",
            "--questionnaire",
            "bfi.json",
            "--sample-size",
            "16",
            "-k",
            "0",
            "--seed",
            "7",
            "--backend",
            "mock",
        ]);
        match cli.command {
            Commands::Run {
                personas,
                questionnaire,
                sample_size,
                tolerance,
                seed,
                backend,
                ..
            } => {
                assert_eq!(personas, Some("personas.json".to_string()));
                assert_eq!(questionnaire, Some("bfi.json".to_string()));
                assert_eq!(sample_size, Some(16));
                assert_eq!(tolerance, Some(0));
                assert_eq!(seed, Some(7));
                assert_eq!(backend, Some("mock".to_string()));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_with_character() {
        let cli = Cli::parse_from(["bfi-assess", "run", "--character", "Beethoven"]);
        match cli.command {
            Commands::Run { character, .. } => {
                assert_eq!(character, Some("Beethoven".to_string()));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["bfi-assess", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["bfi-assess", "--quiet", "version"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_show() {
        let cli = Cli::parse_from(["bfi-assess", "config", "show"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Show { config },
            } => {
                assert!(config.is_none());
            }
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["bfi-assess", "config", "init", "--force"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Init { path, force },
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
