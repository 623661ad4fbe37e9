//! CLI Adapter
//!
//! Command-line interface for snifra.
//! Uses clap derive macros for argument parsing.

mod commands;
mod output;

pub use commands::{BatchCmd, CliApp, Command, ScoreCmd, SniffCmd};
pub use output::{render_assessment, render_summary};

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
