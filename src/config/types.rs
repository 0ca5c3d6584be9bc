//! Configuration data types for axionbot.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use smart_default::SmartDefault;

use super::loader::{DEFAULT_ENV_FILE, load_config};

/// Thread count used when the host CPU count cannot be determined.
const FALLBACK_THREADS: i64 = 8;

/// Returns the host CPU count, or [`FALLBACK_THREADS`] when it is unknown.
fn default_threads() -> i64 {
    std::thread::available_parallelism()
        .ok()
        .and_then(|count| i64::try_from(count.get()).ok())
        .unwrap_or(FALLBACK_THREADS)
}

/// Resolved configuration for the build automation bot.
///
/// Every field always carries a value: sources that are missing or carry
/// unrecognised values leave the default in place. The record is built once
/// by [`ConfigLoader`](super::ConfigLoader) and handed out by value; nothing
/// in this crate mutates it afterwards.
///
/// Serialised keys match the environment variable names, so the JSON form
/// and the dotenv form of a configuration use the same vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BotConfig {
    // Flow control
    /// Run the environment setup script.
    #[default = true]
    pub run_env_setup: bool,

    /// Run the source sync step.
    #[default = true]
    pub run_source_sync: bool,

    /// Run the build step.
    pub run_build: bool,

    /// Print what would happen instead of doing it.
    pub dry_run: bool,

    // Repository settings
    /// Manifest repository URL for AxionOS.
    #[default = "https://github.com/AxionAOSP/android.git"]
    pub axion_remote_url: String,

    /// Manifest branch to sync.
    #[default = "lineage-23.0"]
    pub axion_branch: String,

    // Sync and device settings
    /// Directory the source tree is synced into.
    #[default = "axionos"]
    pub workdir: String,

    /// Parallel job count for sync and build.
    ///
    /// Any base-10 integer is accepted, including zero and negative values;
    /// the build scripts decide what to make of them.
    #[default(_code = "default_threads()")]
    pub threads: i64,

    /// Include the MIUI camera package.
    pub with_miui_cam: bool,

    /// Apply the WPA supplicant patches.
    pub apply_wpa_patches: bool,

    /// Block device to mount as the build volume; empty for none.
    pub build_volume_device: String,

    /// Build with the conservative job settings.
    #[default = true]
    pub use_safe_build: bool,

    // Build and bot options
    /// Device codename.
    #[default = "xaga"]
    pub device: String,

    /// Build variant (`user`, `userdebug`, `eng`).
    #[default = "userdebug"]
    pub variant: String,

    /// ROM flavour: `axion-pico`, `axion-core` or `axion-vanilla`.
    #[default = "axion-pico"]
    pub rom_type: String,

    /// `"1"` marks an official build.
    pub config_official_flag: String,

    /// Telegram chat receiving build notifications.
    pub config_chatid: String,

    /// Telegram bot token.
    pub config_bot_token: String,

    /// Telegram chat receiving error logs; empty to reuse the main chat.
    pub config_error_chatid: String,

    /// rclone remote name for uploads.
    pub rclone_remote: String,

    /// Folder on the rclone remote.
    pub rclone_folder: String,

    /// pixeldrain API key for uploads.
    pub pixeldrain_api_key: String,

    /// Power the host off once the run completes.
    pub poweroff: bool,

    // Announcement options
    /// Upload the OTA JSON alongside the build.
    #[default = true]
    pub upload_ota_json: bool,

    /// Path of the OTA JSON inside the source tree.
    #[default = "vendor/ota/your_device_name.json"]
    pub ota_json_path: String,

    /// Pin the success message in the notification chat.
    #[default = true]
    pub pin_success_message: bool,

    /// The environment file the configuration was resolved against.
    #[default(_code = "Utf8PathBuf::from(DEFAULT_ENV_FILE)")]
    pub env_file: Utf8PathBuf,
}

impl BotConfig {
    /// Loads the configuration from the process environment and the dotenv
    /// file resolved from `env_file`, `ENV_FILE`, `.env` or `.env_xaga`.
    ///
    /// Shorthand for [`load_config`].
    #[must_use]
    pub fn load(env_file: Option<&Utf8Path>) -> Self {
        load_config(env_file)
    }

    /// Returns every field as `(environment key, value)` pairs in
    /// declaration order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, FieldValue<'_>); 27] {
        [
            ("RUN_ENV_SETUP", FieldValue::Bool(self.run_env_setup)),
            ("RUN_SOURCE_SYNC", FieldValue::Bool(self.run_source_sync)),
            ("RUN_BUILD", FieldValue::Bool(self.run_build)),
            ("DRY_RUN", FieldValue::Bool(self.dry_run)),
            ("AXION_REMOTE_URL", FieldValue::Str(&self.axion_remote_url)),
            ("AXION_BRANCH", FieldValue::Str(&self.axion_branch)),
            ("WORKDIR", FieldValue::Str(&self.workdir)),
            ("THREADS", FieldValue::Int(self.threads)),
            ("WITH_MIUI_CAM", FieldValue::Bool(self.with_miui_cam)),
            ("APPLY_WPA_PATCHES", FieldValue::Bool(self.apply_wpa_patches)),
            (
                "BUILD_VOLUME_DEVICE",
                FieldValue::Str(&self.build_volume_device),
            ),
            ("USE_SAFE_BUILD", FieldValue::Bool(self.use_safe_build)),
            ("DEVICE", FieldValue::Str(&self.device)),
            ("VARIANT", FieldValue::Str(&self.variant)),
            ("ROM_TYPE", FieldValue::Str(&self.rom_type)),
            (
                "CONFIG_OFFICIAL_FLAG",
                FieldValue::Str(&self.config_official_flag),
            ),
            ("CONFIG_CHATID", FieldValue::Str(&self.config_chatid)),
            ("CONFIG_BOT_TOKEN", FieldValue::Str(&self.config_bot_token)),
            (
                "CONFIG_ERROR_CHATID",
                FieldValue::Str(&self.config_error_chatid),
            ),
            ("RCLONE_REMOTE", FieldValue::Str(&self.rclone_remote)),
            ("RCLONE_FOLDER", FieldValue::Str(&self.rclone_folder)),
            (
                "PIXELDRAIN_API_KEY",
                FieldValue::Str(&self.pixeldrain_api_key),
            ),
            ("POWEROFF", FieldValue::Bool(self.poweroff)),
            ("UPLOAD_OTA_JSON", FieldValue::Bool(self.upload_ota_json)),
            ("OTA_JSON_PATH", FieldValue::Str(&self.ota_json_path)),
            (
                "PIN_SUCCESS_MESSAGE",
                FieldValue::Bool(self.pin_success_message),
            ),
            ("ENV_FILE", FieldValue::Str(self.env_file.as_str())),
        ]
    }
}

/// A borrowed, typed view of a single configuration value.
///
/// The [`Display`](fmt::Display) form is what shell consumers see: booleans
/// as `true`/`false`, integers in decimal, strings verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A free-form string.
    Str(&'a str),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}
