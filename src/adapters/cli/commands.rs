//! CLI Command Definitions
//!
//! Argument structures for every snifra subcommand.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snifra - Heuristic risk scoring for Solana fungible tokens
#[derive(Parser, Debug)]
#[command(
    name = "snifra",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Heuristic risk scoring for Solana fungible tokens",
    long_about = "Snifra folds a pipeline of pure rules over a token's on-chain, market and \
                  social signals and reports a 0-100 safety score, a risk tier and a \
                  per-rule explanation."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one token from a signals JSON file
    Score(ScoreCmd),

    /// Score every token in a JSON array of signals
    Batch(BatchCmd),

    /// Assemble signals from a snapshot file and score them
    Sniff(SniffCmd),
}

/// Score a single signals document
#[derive(Parser, Debug)]
pub struct ScoreCmd {
    /// Path to a TokenSignals JSON document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Evaluation time (RFC3339), defaults to the current time
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Rule policy: auto, balanced or light
    #[arg(short, long, default_value = "auto")]
    pub policy: String,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Score a batch of signals documents
#[derive(Parser, Debug)]
pub struct BatchCmd {
    /// Path to a JSON array of TokenSignals
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Evaluation time (RFC3339), defaults to the current time
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Print one JSON report per line
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Sniff a token from offline snapshot data
#[derive(Parser, Debug)]
pub struct SniffCmd {
    /// Token mint address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to the snapshot JSON file
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Evaluation time (RFC3339), defaults to the current time
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        CliApp::command().debug_assert();
    }

    #[test]
    fn test_parse_score() {
        let app = CliApp::try_parse_from([
            "snifra", "score", "token.json", "--policy", "light", "--json", "-c", "snifra.toml",
        ])
        .unwrap();

        assert!(!app.verbose);
        match app.command {
            Command::Score(cmd) => {
                assert_eq!(cmd.file, PathBuf::from("token.json"));
                assert_eq!(cmd.policy, "light");
                assert!(cmd.json);
                assert_eq!(cmd.config, Some(PathBuf::from("snifra.toml")));
                assert!(cmd.now.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sniff_with_global_flag() {
        let app = CliApp::try_parse_from([
            "snifra",
            "sniff",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "--snapshot",
            "snapshot.json",
            "--debug",
        ])
        .unwrap();

        assert!(app.debug);
        assert!(matches!(app.command, Command::Sniff(ref cmd) if cmd.snapshot == PathBuf::from("snapshot.json")));
    }

    #[test]
    fn test_sniff_requires_snapshot() {
        assert!(CliApp::try_parse_from(["snifra", "sniff", "Mint111"]).is_err());
    }
}
