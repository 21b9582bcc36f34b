//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Europe/Amsterdam";

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON event log.
    pub data_path: PathBuf,
    /// IANA timezone that defines "today".
    pub timezone: String,
    /// Display name of the person recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_path", &self.data_path)
            .field("timezone", &self.timezone)
            .field("user", &self.user)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("feeding_data.json"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            user: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BT_*)
        figment = figment.merge(Env::prefixed("BT_"));

        figment.extract()
    }

    /// Parses the configured timezone name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow!("invalid timezone '{}': {e}", self.timezone))
    }
}

/// Returns the platform-specific config directory for bt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bt"))
}

/// Returns the platform-specific data directory for bt.
///
/// On Linux: `~/.local/share/bt`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("bt"))
}
