//! Snifra - Token Risk Sniffer
//!
//! Scores Solana fungible tokens from signal files or snapshot data.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use snifra::adapters::cli::{
    render_assessment, render_summary, BatchCmd, CliApp, Command, ScoreCmd, SniffCmd,
};
use snifra::adapters::SnapshotStore;
use snifra::application::{score_batch, Sniffer, SnifferReport};
use snifra::config::{load_config, Config};
use snifra::domain::{parse_timestamp, validate_address, TokenSignals};
use snifra::scoring::{Policy, RiskEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let config_path = match &app.command {
        Command::Score(cmd) => cmd.config.as_deref(),
        Command::Batch(cmd) => cmd.config.as_deref(),
        Command::Sniff(cmd) => cmd.config.as_deref(),
    };
    let config = resolve_config(config_path)?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    let engine = RiskEngine::with_params(config.scoring.clone())
        .context("Invalid scoring parameters")?;

    match app.command {
        Command::Score(cmd) => score_command(cmd, &engine),
        Command::Batch(cmd) => batch_command(cmd, &engine),
        Command::Sniff(cmd) => sniff_command(cmd, engine).await,
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new(configured.to_ascii_lowercase())
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

/// Expand `~` in a user-supplied path
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = expand(path);
            load_config(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        None => {
            let config = Config::default()
                .with_env_overrides()
                .context("Invalid environment override")?;
            config.validate().context("Invalid configuration")?;
            Ok(config)
        }
    }
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_timestamp(raw)
            .with_context(|| format!("Unrecognised timestamp for --now: '{}'", raw)),
        None => Ok(Utc::now()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path = expand(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn score_command(cmd: ScoreCmd, engine: &RiskEngine) -> Result<()> {
    let now = resolve_now(cmd.now.as_deref())?;
    let signals: TokenSignals = read_json(&cmd.file)?;
    signals
        .validate()
        .with_context(|| format!("Invalid signals for {}", signals.address))?;

    let assessment = match cmd.policy.to_ascii_lowercase().as_str() {
        "auto" => engine.evaluate(&signals, now),
        other => {
            let policy: Policy = other.parse().map_err(anyhow::Error::msg)?;
            engine.evaluate_with(policy, &signals, now)
        }
    };

    if cmd.json {
        let report = SnifferReport::new(&signals, assessment);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_assessment(&signals.symbol, &signals.address, &assessment));
    }
    Ok(())
}

fn batch_command(cmd: BatchCmd, engine: &RiskEngine) -> Result<()> {
    let now = resolve_now(cmd.now.as_deref())?;
    let path = expand(&cmd.file);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let outcome = score_batch(&raw, engine, now)
        .with_context(|| format!("Failed to score batch {}", path.display()))?;
    tracing::info!(
        "Scored {} of {} tokens from {}",
        outcome.reports.len(),
        outcome.total(),
        path.display()
    );

    for report in &outcome.reports {
        if cmd.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!("{}", render_summary(&report.symbol, &report.address, &report.assessment));
        }
    }
    Ok(())
}

async fn sniff_command(cmd: SniffCmd, engine: RiskEngine) -> Result<()> {
    validate_address(&cmd.address).context("Invalid token address")?;
    let now = resolve_now(cmd.now.as_deref())?;

    let snapshot_path = expand(&cmd.snapshot);
    let store = Arc::new(
        SnapshotStore::load(&snapshot_path)
            .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?,
    );

    let sniffer = Sniffer::new(store.clone(), store.clone(), store.clone(), store)
        .with_engine(engine);
    let report = sniffer
        .sniff(&cmd.address, now)
        .await
        .with_context(|| format!("Failed to sniff {}", cmd.address))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_assessment(&report.symbol, &report.address, &report.assessment));
    }
    Ok(())
}
