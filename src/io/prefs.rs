//! Preferences that outlive a session. Only the theme is stored.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::config::PrefsConfig;
use crate::model::role::ThemeMode;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";

/// Fallback prefs file when no config directory is known
const LOCAL_PREFS_FILE: &str = ".pulse-prefs.toml";

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// String key-value storage
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store (tests, or when the prefs file is unusable)
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML-file store. Unrelated keys and comments in the file are preserved.
#[derive(Debug)]
pub struct FilePrefStore {
    path: PathBuf,
    doc: toml_edit::DocumentMut,
}

impl FilePrefStore {
    /// Open the store; a missing file starts empty.
    pub fn open(path: &Path) -> Result<Self, PrefsError> {
        let doc = match fs::read_to_string(path) {
            Ok(text) => text.parse().map_err(|e| PrefsError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => toml_edit::DocumentMut::new(),
            Err(e) => {
                return Err(PrefsError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        Ok(FilePrefStore {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.doc.get(key)?.as_str().map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.doc[key] = toml_edit::value(value);
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| PrefsError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;
        }
        atomic_write(&self.path, self.doc.to_string().as_bytes()).map_err(|e| {
            PrefsError::WriteError {
                path: self.path.clone(),
                source: e,
            }
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Where prefs live when the config doesn't say
pub fn default_prefs_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("team-pulse").join("prefs.toml"),
        None => PathBuf::from(LOCAL_PREFS_FILE),
    }
}

/// Open the configured store, degrading to an in-memory one when the file
/// can't be read or parsed.
pub fn open_configured(config: &PrefsConfig) -> Box<dyn PrefStore> {
    let path = config.file.clone().unwrap_or_else(default_prefs_path);
    match FilePrefStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "preferences unavailable, theme will not persist");
            Box::new(MemoryPrefStore::default())
        }
    }
}

/// The stored theme, if it is a recognized value
pub fn load_theme(store: &dyn PrefStore) -> Option<ThemeMode> {
    let raw = store.get(THEME_KEY)?;
    let theme = ThemeMode::parse(&raw);
    if theme.is_none() {
        tracing::warn!(value = %raw, "ignoring unrecognized stored theme");
    }
    theme
}

pub fn save_theme(store: &mut dyn PrefStore, theme: ThemeMode) -> Result<(), PrefsError> {
    store.set(THEME_KEY, theme.as_str())?;
    tracing::info!(theme = theme.as_str(), "saved theme preference");
    Ok(())
}
