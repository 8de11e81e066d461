use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from pulse.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub prefs: PrefsConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Initial role/user/view. Unparseable values fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_role")]
    pub role: String,
    /// Empty = first seeded member
    #[serde(default)]
    pub user: String,
    #[serde(default = "default_view")]
    pub view: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            role: default_role(),
            user: String::new(),
            view: default_view(),
        }
    }
}

fn default_role() -> String {
    "member".into()
}

fn default_view() -> String {
    "overview".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// How often the inactivity check runs
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Inactivity after which the current user is marked Offline
    #[serde(default = "default_inactive_after_secs")]
    pub inactive_after_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            interval_secs: default_interval_secs(),
            inactive_after_secs: default_inactive_after_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}

fn default_inactive_after_secs() -> u64 {
    10 * 60
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON profile file; the built-in roster is used when absent
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefsConfig {
    /// Where the theme preference is stored
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file for the terminal UI (default: temp dir)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by palette slot (`background`, `text`, ...)
    /// or lowercase status name (e.g. `working = "#10B981"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
