//! `axionbot` application entry point.
//!
//! This binary lets the bot's shell scripts read the resolved configuration
//! without reimplementing its precedence rules. It uses `eyre` for opaque
//! error handling at the application boundary, converting domain-specific
//! errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence:
//! 1. Application defaults
//! 2. Dotenv file (`--env-file`, `ENV_FILE`, `.env`, then `.env_xaga`)
//! 3. Environment variables
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG` (default `warn`),
//! so stdout carries only the requested values.

use std::io::Write;

use axionbot::config::{BotConfig, Cli, Commands, GetArgs, ShowArgs, load_config};
use axionbot::error::{AxionbotError, Result as AxionbotResult};
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Installs the diagnostic subscriber, loads the configuration, then
/// dispatches to the appropriate subcommand handler.
fn main() -> EyreResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Loading never fails; problems surface as warnings on stderr.
    let config = load_config(cli.env_file.as_deref());

    let mut stdout = std::io::stdout().lock();
    run(&cli, &config, &mut stdout).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`. A closed or failing `out` is reported as
/// `AxionbotError::Output` rather than a panic.
fn run(cli: &Cli, config: &BotConfig, out: &mut impl Write) -> AxionbotResult<()> {
    match &cli.command {
        Commands::Show(args) => show(config, args, out),
        Commands::ScriptEnv => write_pairs(out, config.script_env()),
        Commands::Get(args) => get(config, args, out),
    }?;
    out.flush().map_err(output_error)
}

/// Print every field.
fn show(config: &BotConfig, args: &ShowArgs, out: &mut impl Write) -> AxionbotResult<()> {
    if args.json {
        let rendered = serde_json::to_string_pretty(config).map_err(|e| {
            AxionbotError::Output {
                message: format!("failed to serialise configuration: {e}"),
            }
        })?;
        write_line(out, &rendered)
    } else {
        write_pairs(out, config.as_map())
    }
}

/// Print a single field.
fn get(config: &BotConfig, args: &GetArgs, out: &mut impl Write) -> AxionbotResult<()> {
    let value = config.get(&args.key)?;
    write_line(out, &value)
}

/// Print `KEY=value` lines.
fn write_pairs(
    out: &mut impl Write,
    pairs: impl IntoIterator<Item = (String, String)>,
) -> AxionbotResult<()> {
    pairs
        .into_iter()
        .try_for_each(|(key, value)| write_line(out, &format!("{key}={value}")))
}

fn write_line(out: &mut impl Write, line: &str) -> AxionbotResult<()> {
    writeln!(out, "{line}").map_err(output_error)
}

fn output_error(error: std::io::Error) -> AxionbotError {
    AxionbotError::Output {
        message: error.to_string(),
    }
}
