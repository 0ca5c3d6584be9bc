//! Semantic error types for the axionbot configuration loader.
//!
//! Loading a configuration never fails from the caller's point of view: the
//! environment file tier reports [`ConfigError`] values internally and the
//! loader degrades to the remaining sources. The types remain public so
//! alternative [`EnvFileParser`](crate::config::EnvFileParser)
//! implementations and the command-line front end can speak the same
//! vocabulary. Opaque errors (`eyre::Report`) are reserved for the binary
//! boundary.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading configuration sources or querying the record.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment file exists but could not be read.
    #[error("failed to read environment file '{path}': {message}")]
    FileRead {
        /// The path of the environment file.
        path: Utf8PathBuf,
        /// A description of the I/O failure.
        message: String,
    },

    /// The environment file could not be parsed as dotenv.
    #[error("failed to parse environment file '{path}': {message}")]
    ParseError {
        /// The path of the environment file.
        path: Utf8PathBuf,
        /// A description of the parse failure.
        message: String,
    },

    /// No dotenv parser is available, so the file tier is skipped.
    #[error("environment file parsing is unavailable")]
    ParserUnavailable,

    /// A lookup named a key that is not a configuration field.
    #[error("unknown configuration field: {field}")]
    UnknownField {
        /// The key that was requested.
        field: String,
    },
}

/// Top-level error type for the axionbot crate.
///
/// This enum aggregates the domain-specific errors into a single type used
/// throughout the application. At the application boundary (`main.rs`) these
/// errors are converted to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum AxionbotError {
    /// An error occurred while handling configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configuration could not be rendered for output.
    #[error("failed to render output: {message}")]
    Output {
        /// A description of the rendering failure.
        message: String,
    },
}

/// A specialised `Result` type for axionbot operations.
pub type Result<T> = std::result::Result<T, AxionbotError>;
