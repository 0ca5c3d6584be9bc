//! Configuration system for axionbot.
//!
//! This module provides the configuration record, the layered loader that
//! builds it, and the CLI definitions for the `axionbot` binary. Precedence,
//! lowest to highest: built-in defaults, a dotenv file, process environment
//! variables.
//!
//! The dotenv file is `.env` in the working directory unless `ENV_FILE` or an
//! explicit path names another one, with `.env_xaga` as a fallback.
//!
//! # Example Environment File
//!
//! ```text
//! RUN_BUILD=true
//! AXION_BRANCH=lineage-23.0
//! THREADS=16
//! WITH_MIUI_CAM=yes
//! CONFIG_CHATID=-1001234567890
//! ```

mod cli;
mod export;
mod loader;
mod parser;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, GetArgs, ShowArgs};
pub use loader::{
    ConfigLoader, DEFAULT_ENV_FILE, ENV_FILE_VAR, FALLBACK_ENV_FILE, coerce_bool, coerce_int,
    env_var_names, load_config,
};
pub use parser::{DotenvParser, EnvFileParser, UnavailableParser};
pub use types::{BotConfig, FieldValue};
