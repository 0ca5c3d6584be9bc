//! Layered configuration for the AxionOS build automation bot.
//!
//! `axionbot` resolves the settings that drive the bot's environment setup,
//! source sync, build and notification steps. Values come from built-in
//! defaults, a dotenv file and the process environment, in ascending order
//! of precedence, and are coerced into a typed [`config::BotConfig`].
//!
//! Loading is forgiving: a missing or malformed file and values
//! that do not parse never abort the process. They fall back to the next
//! source or to the field default.
//!
//! # Modules
//!
//! - [`config`]: Configuration record, layered loader and CLI definitions
//! - [`error`]: Semantic error types for the application
//!
//! # Example
//!
//! ```no_run
//! use axionbot::config::load_config;
//!
//! let config = load_config(None);
//! let _status = std::process::Command::new("./scripts/setup_xaga_env.sh")
//!     .envs(config.script_env())
//!     .status();
//! ```

pub mod config;
pub mod error;
