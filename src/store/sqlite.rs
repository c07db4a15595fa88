//! SQLite-backed store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{KeyValueStore, KvEntry, StoreError, StoreOp, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// [`KeyValueStore`] persisted in a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// Each operation opens its own connection, so `":memory:"` would lose
    /// data between calls; use [`MemoryStore`](crate::MemoryStore) instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };

        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(StoreOp::Migrate, e.to_string()))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore opened");

        Ok(store)
    }

    /// Path of the underlying database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(StoreOp::Open, format!("{}: {}", self.db_path, e)))
    }

    /// Lists every stored row, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entries(&self) -> Result<Vec<KvEntry>, StoreError> {
        let mut conn = self.connection()?;
        // Closures keep the reported error location inside this file.
        let rows = schema::kv_entries::table
            .order(schema::kv_entries::key.asc())
            .select(KvEntry::as_select())
            .load(&mut conn)
            .map_err(|e| StoreError::read(e))?;
        debug!(count = rows.len(), "Entries loaded");
        Ok(rows)
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let value = schema::kv_entries::table
            .filter(schema::kv_entries::key.eq(key))
            .select(schema::kv_entries::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| StoreError::read(e))?;
        debug!(found = value.is_some(), "Key looked up");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let entry = KvEntry::new(key.to_string(), value.to_string(), Utc::now().naive_utc());

        diesel::insert_into(schema::kv_entries::table)
            .values(&entry)
            .on_conflict(schema::kv_entries::key)
            .do_update()
            .set((
                schema::kv_entries::value.eq(value),
                schema::kv_entries::updated_at.eq(*entry.updated_at()),
            ))
            .execute(&mut conn)
            .map_err(|e| StoreError::write(e))?;

        debug!("Key stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(
            schema::kv_entries::table.filter(schema::kv_entries::key.eq(key)),
        )
        .execute(&mut conn)
        .map_err(|e| StoreError::write(e))?;
        debug!(removed, "Key removed");
        Ok(())
    }
}
