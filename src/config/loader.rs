//! Configuration loading with layered precedence.
//!
//! Sources, lowest to highest priority: built-in defaults, a dotenv file,
//! process environment variables. Raw strings from the file and the
//! environment are merged first and coerced second, so an environment value
//! always replaces the file value for the same key, even when it then fails
//! to coerce.
//!
//! # Graceful degradation
//!
//! Nothing in this module returns an error. A missing file, an unavailable
//! parser, unreadable content and unparseable values all fall back to the
//! next source or to the field default. Malformed lines are skipped by the
//! parser and the rest of the file still applies. Problems with a file that
//! exists are logged at `warn`; the resulting configuration is the same
//! either way.
//!
//! # Environment file resolution
//!
//! 1. The explicit path passed to [`ConfigLoader::load`], if non-empty.
//! 2. The `ENV_FILE` environment variable, if non-empty.
//! 3. `.env` in the search directory.
//!
//! If the chosen path is not a regular file and `.env_xaga` exists in the
//! search directory, `.env_xaga` is used instead. The search directory is
//! the current working directory unless set with
//! [`ConfigLoader::with_search_dir`].

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultEnv;
use tracing::{debug, warn};

use super::parser::{DotenvParser, EnvFileParser};
use super::BotConfig;
use crate::error::ConfigError;

/// Environment variable naming the environment file.
pub const ENV_FILE_VAR: &str = "ENV_FILE";

/// Environment file used when nothing else names one.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Environment file used when the resolved file does not exist.
pub const FALLBACK_ENV_FILE: &str = ".env_xaga";

/// Strings coerced to `true`, compared after trimming and lowercasing.
const TRUTHY: &[&str] = &["1", "true", "yes", "y", "on"];

/// Strings coerced to `false`, compared after trimming and lowercasing.
const FALSY: &[&str] = &["0", "false", "no", "n", "off"];

/// Coerces a raw value to a boolean, keeping `default` for absent or
/// unrecognised values.
#[must_use]
pub fn coerce_bool(raw: Option<&str>, default: bool) -> bool {
    let Some(value) = raw else {
        return default;
    };
    let normalised = value.trim().to_lowercase();
    if TRUTHY.contains(&normalised.as_str()) {
        true
    } else if FALSY.contains(&normalised.as_str()) {
        false
    } else {
        default
    }
}

/// Coerces a raw value to a base-10 integer, keeping `default` for absent or
/// unparseable values. A leading sign is accepted.
#[must_use]
pub fn coerce_int(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Raw key/value pairs merged across the file and environment tiers.
#[derive(Debug, Default)]
struct MergedSource {
    values: HashMap<String, String>,
}

impl MergedSource {
    /// Applies a tier on top of what is already merged.
    fn overlay(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        self.values.extend(pairs);
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        coerce_bool(self.raw(key), default)
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        coerce_int(self.raw(key), default)
    }

    fn string_or(&self, key: &str, default: String) -> String {
        self.raw(key).map_or(default, str::to_owned)
    }
}

/// Loads [`BotConfig`] from a dotenv file and the environment.
///
/// # Type Parameters
///
/// * `E` - An environment provider implementing the `mockable::Env` trait.
/// * `P` - The dotenv parsing capability; see [`EnvFileParser`].
///
/// # Example
///
/// ```ignore
/// use axionbot::config::{ConfigLoader, DotenvParser};
/// use mockable::DefaultEnv;
///
/// let env = DefaultEnv::new();
/// let config = ConfigLoader::new(&env, DotenvParser).load(None);
/// println!("building {} with {} jobs", config.device, config.threads);
/// ```
pub struct ConfigLoader<'a, E: mockable::Env, P: EnvFileParser> {
    env: &'a E,
    parser: P,
    search_dir: Option<Utf8PathBuf>,
}

impl<'a, E: mockable::Env, P: EnvFileParser> ConfigLoader<'a, E, P> {
    /// Creates a loader reading from `env` and parsing files with `parser`.
    #[must_use]
    pub const fn new(env: &'a E, parser: P) -> Self {
        Self {
            env,
            parser,
            search_dir: None,
        }
    }

    /// Looks up `.env` and `.env_xaga` in `dir` instead of the working
    /// directory.
    #[must_use]
    pub fn with_search_dir(mut self, dir: Utf8PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    fn locate(&self, file_name: &str) -> Utf8PathBuf {
        self.search_dir
            .as_ref()
            .map_or_else(|| Utf8PathBuf::from(file_name), |dir| dir.join(file_name))
    }

    /// Resolves the environment file path without reading it.
    ///
    /// The returned path is what [`load`](Self::load) records in
    /// `BotConfig::env_file`; it may not exist.
    #[must_use]
    pub fn resolve_env_file(&self, explicit: Option<&Utf8Path>) -> Utf8PathBuf {
        let primary = explicit
            .filter(|path| !path.as_str().is_empty())
            .map(Utf8Path::to_path_buf)
            .or_else(|| {
                self.env
                    .string(ENV_FILE_VAR)
                    .filter(|value| !value.is_empty())
                    .map(Utf8PathBuf::from)
            })
            .unwrap_or_else(|| self.locate(DEFAULT_ENV_FILE));

        if primary.is_file() {
            return primary;
        }

        let fallback = self.locate(FALLBACK_ENV_FILE);
        if fallback.is_file() {
            debug!(%primary, %fallback, "environment file missing; using fallback");
            fallback
        } else {
            primary
        }
    }

    /// Reads the file tier, or nothing if the file cannot contribute.
    fn read_file_tier(&self, path: &Utf8Path) -> Vec<(String, String)> {
        if !path.is_file() {
            debug!(%path, "no environment file; using process environment only");
            return Vec::new();
        }

        match self.parser.parse(path) {
            Ok(pairs) => {
                debug!(%path, entries = pairs.len(), "loaded environment file");
                pairs
            }
            Err(ConfigError::ParserUnavailable) => {
                debug!(%path, "dotenv parsing unavailable; skipping environment file");
                Vec::new()
            }
            Err(error) => {
                warn!(%path, %error, "ignoring environment file");
                Vec::new()
            }
        }
    }

    /// Loads the configuration.
    ///
    /// Never fails: every source problem degrades to the remaining sources
    /// or to the field default.
    #[must_use]
    pub fn load(&self, explicit: Option<&Utf8Path>) -> BotConfig {
        let env_file = self.resolve_env_file(explicit);
        let defaults = BotConfig::default();

        let mut source = MergedSource::default();
        source.overlay(self.read_file_tier(&env_file));
        source.overlay(defaults.fields().into_iter().filter_map(|(key, _)| {
            self.env
                .string(key)
                .map(|value| (key.to_owned(), value))
        }));

        build_config(&source, defaults, env_file)
    }
}

/// Coerces every field from the merged source, keeping defaults where the
/// source has nothing usable.
fn build_config(source: &MergedSource, defaults: BotConfig, env_file: Utf8PathBuf) -> BotConfig {
    BotConfig {
        run_env_setup: source.bool_or("RUN_ENV_SETUP", defaults.run_env_setup),
        run_source_sync: source.bool_or("RUN_SOURCE_SYNC", defaults.run_source_sync),
        run_build: source.bool_or("RUN_BUILD", defaults.run_build),
        dry_run: source.bool_or("DRY_RUN", defaults.dry_run),
        axion_remote_url: source.string_or("AXION_REMOTE_URL", defaults.axion_remote_url),
        axion_branch: source.string_or("AXION_BRANCH", defaults.axion_branch),
        workdir: source.string_or("WORKDIR", defaults.workdir),
        threads: source.int_or("THREADS", defaults.threads),
        with_miui_cam: source.bool_or("WITH_MIUI_CAM", defaults.with_miui_cam),
        apply_wpa_patches: source.bool_or("APPLY_WPA_PATCHES", defaults.apply_wpa_patches),
        build_volume_device: source
            .string_or("BUILD_VOLUME_DEVICE", defaults.build_volume_device),
        use_safe_build: source.bool_or("USE_SAFE_BUILD", defaults.use_safe_build),
        device: source.string_or("DEVICE", defaults.device),
        variant: source.string_or("VARIANT", defaults.variant),
        rom_type: source.string_or("ROM_TYPE", defaults.rom_type),
        config_official_flag: source
            .string_or("CONFIG_OFFICIAL_FLAG", defaults.config_official_flag),
        config_chatid: source.string_or("CONFIG_CHATID", defaults.config_chatid),
        config_bot_token: source.string_or("CONFIG_BOT_TOKEN", defaults.config_bot_token),
        config_error_chatid: source
            .string_or("CONFIG_ERROR_CHATID", defaults.config_error_chatid),
        rclone_remote: source.string_or("RCLONE_REMOTE", defaults.rclone_remote),
        rclone_folder: source.string_or("RCLONE_FOLDER", defaults.rclone_folder),
        pixeldrain_api_key: source.string_or("PIXELDRAIN_API_KEY", defaults.pixeldrain_api_key),
        poweroff: source.bool_or("POWEROFF", defaults.poweroff),
        upload_ota_json: source.bool_or("UPLOAD_OTA_JSON", defaults.upload_ota_json),
        ota_json_path: source.string_or("OTA_JSON_PATH", defaults.ota_json_path),
        pin_success_message: source.bool_or("PIN_SUCCESS_MESSAGE", defaults.pin_success_message),
        env_file,
    }
}

/// Loads the configuration from the process environment, parsing the
/// environment file with `dotenvy`.
///
/// `env_file` takes precedence over `ENV_FILE`; see the module
/// documentation for the full resolution order.
#[must_use]
pub fn load_config(env_file: Option<&Utf8Path>) -> BotConfig {
    let env = DefaultEnv::new();
    ConfigLoader::new(&env, DotenvParser).load(env_file)
}

/// Returns the list of environment variable names recognised by the loader,
/// in field declaration order.
///
/// `ENV_FILE` is included: it selects the environment file and is reported
/// back as the resolved path.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    BotConfig::default()
        .fields()
        .into_iter()
        .map(|(key, _)| key)
        .collect()
}
