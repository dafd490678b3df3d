use crate::models::Profile;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

pub const PROFILE_KEY: &str = "profile";
pub const TOKEN_KEY: &str = "eventbrite_token";

/// Display names and cities left behind by earlier demo builds
const PLACEHOLDER_NAMES: [&str; 2] = ["AppleUser", "Tom"];
const PLACEHOLDER_CITY: &str = "London";

/// Errors that can occur when reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// String key/value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store, used in tests and when no data directory is configured
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Typed access to the profile record and the Eventbrite token
pub struct SessionStorage<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the saved profile
    ///
    /// A record that no longer parses is treated as absent.
    pub fn load_profile(&self) -> Result<Option<Profile>, StorageError> {
        let Some(json) = self.store.get(PROFILE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Profile>(&json) {
            Ok(mut profile) => {
                scrub_placeholders(&mut profile);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable saved profile: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &json)
    }

    /// Load the saved token; an empty token counts as none
    pub fn load_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)
    }
}

/// Clear demo placeholder values so the user is asked for real ones
pub fn scrub_placeholders(profile: &mut Profile) {
    if PLACEHOLDER_NAMES.contains(&profile.display_name.as_str()) {
        profile.display_name.clear();
    }
    if profile.city == PLACEHOLDER_CITY {
        profile.city.clear();
    }
}
