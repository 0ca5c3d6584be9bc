//! String views of a [`BotConfig`] for external processes.
//!
//! Shell scripts only understand environment-style strings, so these views
//! flatten the typed record through [`FieldValue`]'s display form. Maps are
//! ordered by key to keep output stable between runs.

use std::collections::BTreeMap;

use super::{BotConfig, FieldValue};
use crate::error::ConfigError;

/// Keys handed to the environment setup script.
const SCRIPT_ENV_KEYS: &[&str] = &[
    "AXION_REMOTE_URL",
    "AXION_BRANCH",
    "WORKDIR",
    "THREADS",
    "WITH_MIUI_CAM",
    "APPLY_WPA_PATCHES",
    "BUILD_VOLUME_DEVICE",
];

impl BotConfig {
    /// Environment variables for the environment setup script.
    ///
    /// The result can be passed directly to
    /// [`Command::envs`](std::process::Command::envs).
    #[must_use]
    pub fn script_env(&self) -> BTreeMap<String, String> {
        self.fields()
            .into_iter()
            .filter(|(key, _)| SCRIPT_ENV_KEYS.contains(key))
            .map(render)
            .collect()
    }

    /// Every field, including `ENV_FILE`, rendered as strings.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.fields().into_iter().map(render).collect()
    }

    /// Returns the rendered value of the field named by its environment key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownField` if `key` does not name a field.
    /// Keys are case-sensitive.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
            .ok_or_else(|| ConfigError::UnknownField {
                field: key.to_owned(),
            })
    }
}

fn render((key, value): (&'static str, FieldValue<'_>)) -> (String, String) {
    (key.to_owned(), value.to_string())
}
