use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Preference store lock error: {0}")]
    LockError(String),
    #[error("Invalid preference key: {0}")]
    InvalidKey(String),
    #[error("Failed to persist preferences to {path}: {message}")]
    Persist { path: PathBuf, message: String },
}

/// Small string key-value store for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("Key cannot be empty".to_string()));
    }
    Ok(())
}

fn read_entry(store: &Mutex<HashMap<String, String>>, key: &str) -> Option<String> {
    match store.lock() {
        Ok(store) => store.get(key).cloned(),
        Err(e) => {
            tracing::error!("Failed to acquire preference lock for key {}: {}", key, e);
            None
        }
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Default, Clone)]
pub struct InmemoryStore {
    store: Arc<Mutex<HashMap<String, String>>>,
}

impl InmemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InmemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        read_entry(&self.store, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let mut store = self
            .store
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        store.insert(key.to_string(), value.to_string());
        tracing::debug!("Stored preference {} = {}", key, value);
        Ok(())
    }
}

/// JSON-object file, read once on open and rewritten on every `set`.
pub struct FileStore {
    path: PathBuf,
    store: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// A missing file starts empty; an unreadable or corrupt one is logged
    /// and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt preference file {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read preference file {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        tracing::info!(
            "Loaded {} preference(s) from {}",
            entries.len(),
            path.display()
        );
        Self {
            path,
            store: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let to_error = |message: String| StoreError::Persist {
            path: self.path.clone(),
            message,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| to_error(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| to_error(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        read_entry(&self.store, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let mut store = self
            .store
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        let previous = store.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&store) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => store.insert(key.to_string(), old),
                None => store.remove(key),
            };
            tracing::error!("{}", e);
            return Err(e);
        }
        tracing::debug!("Persisted preference {} = {}", key, value);
        Ok(())
    }
}
