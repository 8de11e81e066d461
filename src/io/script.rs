use std::fs;
use std::path::{Path, PathBuf};

use crate::ops::action::Action;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("could not read script {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse script {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a replay script: a JSON array of actions
pub fn read_script(path: &Path) -> Result<Vec<Action>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|e| ScriptError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ScriptError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}
