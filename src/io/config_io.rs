use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::PulseConfig;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pulse.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<PulseConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the config: an explicit path must exist; otherwise `pulse.toml`
/// in `cwd` is used when present, else the defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<PulseConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        read_config(&local)
    } else {
        Ok(PulseConfig::default())
    }
}
