//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use wurmlog_core::{DEFAULT_RUN_GAP_MINUTES, DEFAULT_SESSION_GAP_MINUTES};

/// Default trailing-window length for rate extraction, in minutes.
const DEFAULT_WINDOW_MINUTES: u32 = 15;

/// Default watch-mode poll period, in seconds.
const DEFAULT_POLL_SECS: u64 = 1;

/// Application configuration.
///
/// Every field can be overridden per invocation by the matching CLI flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Idle minutes that split two play sessions.
    pub session_gap_minutes: u32,
    /// Largest idle gap tolerated inside a trailing run, in minutes.
    pub run_gap_minutes: u32,
    /// Trailing window length for rate extraction, in minutes.
    pub window_minutes: u32,
    /// Watch-mode poll period, in seconds.
    pub poll_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_gap_minutes: DEFAULT_SESSION_GAP_MINUTES,
            run_gap_minutes: DEFAULT_RUN_GAP_MINUTES,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            poll_secs: DEFAULT_POLL_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

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

        // Load from environment variables (WURMLOG_*)
        figment = figment.merge(Env::prefixed("WURMLOG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for wurmlog.
///
/// On Linux: `~/.config/wurmlog`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wurmlog"))
}
