//! Dotenv parsing capability for the environment file tier.
//!
//! The loader never parses files itself; it asks an [`EnvFileParser`]. This
//! keeps the file tier optional: [`UnavailableParser`] reports the capability
//! as missing and the loader skips the tier, while [`DotenvParser`] does the
//! real work with `dotenvy`.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::warn;

use crate::error::ConfigError;

/// Parses a dotenv-formatted file into ordered key/value pairs.
///
/// Production code uses [`DotenvParser`]; tests inject mocks via `mockall`.
#[cfg_attr(test, mockall::automock)]
pub trait EnvFileParser {
    /// Parses the file at `path`.
    ///
    /// Later pairs win over earlier pairs with the same key when the caller
    /// merges them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileRead` if the file cannot be read,
    /// `ConfigError::ParseError` if its content cannot be parsed at all, or
    /// `ConfigError::ParserUnavailable` if this parser cannot parse at all.
    fn parse(&self, path: &Utf8Path) -> Result<Vec<(String, String)>, ConfigError>;
}

/// Parser backed by `dotenvy`.
///
/// Values are returned without being written to the process environment.
/// Malformed entries, including a bare `KEY` without `=`, are skipped with a
/// warning and the remaining entries are kept.
///
/// `$VAR` and `${VAR}` references in values are expanded by `dotenvy`. It
/// looks them up in the real process environment first and then in entries
/// earlier in the same file; the loader's injected `mockable::Env` is not
/// consulted. Undefined references expand to the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvParser;

impl EnvFileParser for DotenvParser {
    fn parse(&self, path: &Utf8Path) -> Result<Vec<(String, String)>, ConfigError> {
        let content = read_env_file(path)?;
        let mut pairs = Vec::new();
        for entry in dotenvy::from_read_iter(content.as_bytes()) {
            match entry {
                Ok(pair) => pairs.push(pair),
                Err(dotenvy::Error::LineParse(_, index)) => {
                    warn!(%path, position = index, "skipping malformed environment file entry");
                }
                Err(error) => {
                    return Err(ConfigError::ParseError {
                        path: path.to_path_buf(),
                        message: describe_dotenv_error(&error),
                    });
                }
            }
        }
        Ok(pairs)
    }
}

/// Parser standing in for a missing dotenv capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableParser;

impl EnvFileParser for UnavailableParser {
    fn parse(&self, _path: &Utf8Path) -> Result<Vec<(String, String)>, ConfigError> {
        Err(ConfigError::ParserUnavailable)
    }
}

/// Reads the environment file through a capability on its parent directory.
///
/// The path is canonicalised first so a symlinked `.env` is read from its
/// target's directory; cap-std refuses to follow links out of a `Dir`.
fn read_env_file(path: &Utf8Path) -> Result<String, ConfigError> {
    let target = path
        .canonicalize_utf8()
        .map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            message: format!("failed to resolve path: {e}"),
        })?;
    let parent = target.parent().unwrap_or_else(|| Utf8Path::new("/"));
    let file_name = target.file_name().unwrap_or(target.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::FileRead {
            path: path.to_path_buf(),
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    dir.read_to_string(file_name)
        .map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Describes a dotenv failure without echoing file content.
///
/// Environment files carry bot tokens and API keys, so the offending line
/// never reaches an error message or a log.
fn describe_dotenv_error(error: &dotenvy::Error) -> String {
    match error {
        dotenvy::Error::LineParse(_, index) => format!("malformed entry at position {index}"),
        dotenvy::Error::Io(io_error) => format!("I/O error: {}", io_error.kind()),
        _ => String::from("unrecognised dotenv error"),
    }
}
