//! Preference persistence
//!
//! Provides a small key/value API for the preferences that survive a restart
//! (view mode and active dataset), using sled as the embedded database
//! backend.
//!
//! Values are stored as JSON under a single key in the `preferences` tree.
//! Reads never fail a session: missing or malformed data falls back to
//! [`Preferences::default`].

use crate::state::Preferences;
use sled::{Db, Tree};
use std::path::Path;
use std::sync::Mutex;

pub mod error;

pub use error::DbError;

/// Key holding the serialized preferences
const PREFERENCES_KEY: &[u8] = b"preferences";

/// Key/value store for persisted preferences
pub trait PreferenceStore: Send + Sync {
    /// Read stored preferences
    ///
    /// # Returns
    /// * `Ok(Some(_))` if preferences were stored and decoded
    /// * `Ok(None)` if nothing has been stored yet
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read or the data is malformed.
    fn load(&self) -> Result<Option<Preferences>, DbError>;

    /// Replace stored preferences
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store rejects the write.
    fn save(&self, preferences: &Preferences) -> Result<(), DbError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Preferences>, DbError> {
        (**self).load()
    }

    fn save(&self, preferences: &Preferences) -> Result<(), DbError> {
        (**self).save(preferences)
    }
}

/// Read preferences, falling back to defaults on any failure
#[must_use]
pub fn load_or_default(store: &dyn PreferenceStore) -> Preferences {
    load_or(store, Preferences::default())
}

/// Read preferences, falling back to `fallback` when nothing usable is stored
#[must_use]
pub fn load_or(store: &dyn PreferenceStore, fallback: Preferences) -> Preferences {
    match store.load() {
        Ok(Some(preferences)) => preferences,
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable preferences");
            fallback
        }
    }
}

fn decode(bytes: &[u8]) -> Result<Preferences, DbError> {
    serde_json::from_slice(bytes).map_err(DbError::DecodeError)
}

fn encode(preferences: &Preferences) -> Result<Vec<u8>, DbError> {
    serde_json::to_vec(preferences).map_err(DbError::EncodeError)
}

/// Database wrapper that encapsulates all persistence operations
pub struct Database {
    db: Db,
    preferences: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use stylebook::db::Database;
    /// let db = Database::open("state").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let preferences = db.open_tree("preferences")?;
        Ok(Self { db, preferences })
    }

    /// Remove all stored data
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the clear operation fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.preferences.clear()?;
        Ok(())
    }

    /// Store raw bytes under the preferences key
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the write fails.
    pub fn put_raw(&self, bytes: &[u8]) -> Result<(), DbError> {
        self.preferences.insert(PREFERENCES_KEY, bytes)?;
        Ok(())
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }
}

impl PreferenceStore for Database {
    fn load(&self) -> Result<Option<Preferences>, DbError> {
        match self.preferences.get(PREFERENCES_KEY)? {
            Some(value) => decode(&value).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<(), DbError> {
        self.put_raw(&encode(preferences)?)?;
        self.flush()
    }
}

/// In-memory store, used when no state directory is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<Vec<u8>>>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes always fail
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            value: Mutex::new(None),
            read_only: true,
        }
    }

    /// Store seeded with raw bytes
    #[must_use]
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            value: Mutex::new(Some(bytes.into())),
            read_only: false,
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Vec<u8>>>, DbError> {
        self.value
            .lock()
            .map_err(|_| DbError::Unavailable("store lock poisoned".to_string()))
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Preferences>, DbError> {
        self.slot()?.as_deref().map(decode).transpose()
    }

    fn save(&self, preferences: &Preferences) -> Result<(), DbError> {
        if self.read_only {
            return Err(DbError::Unavailable("store is read-only".to_string()));
        }
        *self.slot()? = Some(encode(preferences)?);
        Ok(())
    }
}
