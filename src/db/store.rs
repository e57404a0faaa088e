//! Key-value stores backing scores and game history.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::db::{StoreError, StoreOp, schema::kv_entries};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// String key-value storage.
///
/// Handles are cheap to clone and clones share the underlying data, so the
/// score tracker and the analytics recorder can each hold one.
pub trait KeyValueStore: Clone {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads a JSON blob, falling back to `T::default()` when the key is
/// missing, unreadable or holds malformed JSON.
#[instrument(skip(store))]
pub(crate) fn load_json<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("Nothing stored, using defaults");
            return T::default();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored data, using defaults");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Stored data is corrupt, using defaults");
        T::default()
    })
}

/// Writes `value` as JSON. Failures are logged and dropped.
#[instrument(skip(store, value))]
pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to encode data");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        warn!(error = %e, "Failed to persist data");
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    const BACKEND: &'static str = "memory";

    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
        op: StoreOp,
        key: &str,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::new(Self::BACKEND, op, key, e))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock(StoreOp::Read, key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock(StoreOp::Write, key)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock(StoreOp::Remove, key)?.remove(key);
        Ok(())
    }
}

/// SQLite-backed store, one row per key.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    const BACKEND: &'static str = "sqlite";

    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument]
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        let mut conn = store.connection(StoreOp::Open, db_path)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(Self::BACKEND, StoreOp::Open, db_path, e))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore ready");
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection for `op` on `target`.
    #[instrument(skip(self))]
    fn connection(&self, op: StoreOp, target: &str) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(
                Self::BACKEND,
                op,
                target,
                format!("cannot connect to {}: {}", self.db_path, e),
            )
        })
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection(StoreOp::Read, key)?;
        let value = kv_entries::table
            .find(key)
            .select(kv_entries::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| StoreError::new(Self::BACKEND, StoreOp::Read, key, e))?;
        debug!(found = value.is_some(), "Key looked up");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection(StoreOp::Write, key)?;
        diesel::replace_into(kv_entries::table)
            .values((kv_entries::key.eq(key), kv_entries::value.eq(value)))
            .execute(&mut conn)
            .map_err(|e| StoreError::new(Self::BACKEND, StoreOp::Write, key, e))?;
        debug!("Key written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection(StoreOp::Remove, key)?;
        let removed = diesel::delete(kv_entries::table.find(key))
            .execute(&mut conn)
            .map_err(|e| StoreError::new(Self::BACKEND, StoreOp::Remove, key, e))?;
        debug!(removed, "Key removed");
        Ok(())
    }
}
