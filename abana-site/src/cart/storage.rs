//! Local key/value slots for client-side state
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `local_storage` | slot key | serialized text | One entry per slot (`abanaCart`, ...) |
//!
//! [`RedbLocalStorage`] survives restarts; [`MemoryLocalStorage`] lives for
//! the process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::AppError;
use thiserror::Error;

/// Slot table: key = slot name, value = stored text
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::database(err.to_string())
    }
}

/// Browser-style string slots
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Slots persisted in a redb file
#[derive(Clone)]
pub struct RedbLocalStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbLocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbLocalStorage").finish_non_exhaustive()
    }
}

impl RedbLocalStorage {
    /// Open or create the slot file at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Slots that vanish with the process (tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table up front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl LocalStorage for RedbLocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Slots held in a map
#[derive(Debug, Default)]
pub struct MemoryLocalStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(storage: &dyn LocalStorage) {
        assert_eq!(storage.get_item("abanaCart").unwrap(), None);

        storage.set_item("abanaCart", "[]").unwrap();
        assert_eq!(storage.get_item("abanaCart").unwrap().as_deref(), Some("[]"));

        storage.set_item("abanaCart", r#"[{"name":"Tea"}]"#).unwrap();
        assert_eq!(
            storage.get_item("abanaCart").unwrap().as_deref(),
            Some(r#"[{"name":"Tea"}]"#)
        );

        storage.remove_item("abanaCart").unwrap();
        assert_eq!(storage.get_item("abanaCart").unwrap(), None);
        // Removing twice is fine
        storage.remove_item("abanaCart").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        exercise(&MemoryLocalStorage::new());
    }

    #[test]
    fn test_redb_in_memory() {
        exercise(&RedbLocalStorage::open_in_memory().unwrap());
    }

    #[test]
    fn test_redb_file_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.redb");
        {
            let storage = RedbLocalStorage::open(&path).unwrap();
            storage.set_item("abanaCart", "saved").unwrap();
        }
        let storage = RedbLocalStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("abanaCart").unwrap().as_deref(), Some("saved"));
    }
}
