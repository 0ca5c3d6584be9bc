//! Command-line argument definitions for axionbot.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for axionbot.
#[derive(Debug, Parser)]
#[command(name = "axionbot")]
#[command(
    author,
    version,
    about = "Resolve the AxionOS build bot configuration for scripts"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the dotenv file (overrides `ENV_FILE`).
    #[arg(long, global = true)]
    pub env_file: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every configuration field.
    Show(ShowArgs),

    /// Print the variables passed to the environment setup script.
    ScriptEnv,

    /// Print a single configuration field.
    Get(GetArgs),
}

/// Arguments for the `show` subcommand.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Print a JSON object with typed values instead of `KEY=value` lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` subcommand.
#[derive(Debug, Parser)]
pub struct GetArgs {
    /// Field name, as its environment variable (for example `THREADS`).
    #[arg(required = true)]
    pub key: String,
}
