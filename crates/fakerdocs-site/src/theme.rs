//! Persisted light/dark theme preference.
//!
//! The preference is read once when [`ThemePreference`] is created and kept
//! in a `watch` channel so the header and any other subscriber see changes
//! immediately. Writes go through a [`PreferenceStore`] under a fixed key.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Colour scheme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl Theme {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Next theme in the header toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized theme name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown theme '{0}', expected light, dark or system")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Preference storage failure.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// I/O error reading or writing the store.
    #[error("Preference store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Store contents are not a JSON object of strings.
    #[error("Preference store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store for user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// A missing file reads as empty. Parent directories are created on first write.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store for `path`. Nothing is read until first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().unwrap();

        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Process-wide theme preference with get/set/subscribe.
pub struct ThemePreference {
    store: Arc<dyn PreferenceStore>,
    key: String,
    current: watch::Sender<Theme>,
    update_lock: Mutex<()>,
}

impl ThemePreference {
    /// Load the stored preference, falling back to `default`.
    ///
    /// Unreadable stores and unknown values are logged and ignored.
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>, default: Theme) -> Self {
        let key = key.into();
        let initial = match store.get(&key) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e: UnknownTheme| {
                tracing::warn!(key = %key, error = %e, "Ignoring stored theme");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read theme preference");
                default
            }
        };

        let (current, _rx) = watch::channel(initial);
        Self {
            store,
            key,
            current,
            update_lock: Mutex::new(()),
        }
    }

    /// Current theme.
    pub fn get(&self) -> Theme {
        *self.current.borrow()
    }

    /// Persist `theme` and notify subscribers.
    ///
    /// Concurrent calls are serialized so the broadcast value always matches
    /// the last persisted one. The store write blocks the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the store error; subscribers are not notified in that case.
    pub fn set(&self, theme: Theme) -> Result<(), PreferenceError> {
        let _guard = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.set(&self.key, theme.as_str())?;
        self.current.send_replace(theme);
        tracing::debug!(key = %self.key, theme = %theme, "Theme preference updated");
        Ok(())
    }

    /// Watch for changes.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.current.subscribe()
    }

    /// Key the preference is stored under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }
}
