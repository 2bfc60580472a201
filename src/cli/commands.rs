//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::config::Backend;

#[derive(Parser, Debug)]
#[command(name = "quickrag")]
#[command(about = "Answer one question from a tiny corpus stored in pgvector or Chroma")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: configured level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub backend: Option<Backend>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reset storage, seed the example documents and answer one question
    Ask {
        /// Question to ask; read from standard input when omitted
        #[arg(short, long)]
        question: Option<String>,
    },
    /// Reset storage and seed the example documents only
    Seed,
    /// Show current configuration (secrets masked)
    Config,
}

impl Cli {
    /// The subcommand to run; `ask` with a prompted question by default
    #[must_use]
    pub fn subcommand(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Ask { question: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_ask() {
        let cli = Cli::parse_from(["quickrag"]);
        assert_eq!(cli.subcommand(), Commands::Ask { question: None });
        assert!(cli.backend.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "quickrag",
            "ask",
            "--question",
            "When does the club meet?",
            "--backend",
            "chroma",
            "-v",
        ]);

        assert_eq!(
            cli.subcommand(),
            Commands::Ask {
                question: Some("When does the club meet?".to_string())
            }
        );
        assert_eq!(cli.backend, Some(Backend::Chroma));
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Cli::try_parse_from(["quickrag", "--backend", "sqlite", "seed"]).is_err());
    }
}
