//! Persistence backends for the cart mirror.
//!
//! The persistence medium is an opaque string-keyed key-value store
//! with get/set semantics: the whole value is overwritten on every
//! successful mutation. No versioning, no migration.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing medium exists but cannot be decoded.
    #[error("storage backing file is corrupt: {0}")]
    Corrupt(String),
}

/// String-keyed key-value store holding the persisted cart mirror.
///
/// Implementations are process-local and unshared; callers overwrite
/// the entire value on every write.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one JSON file holding the key-value map.
///
/// Writes go through a temp file followed by a rename, so a write that
/// dies halfway never truncates the existing mirror.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a store backed by the given file. The file is created on
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        let encoded =
            serde_json::to_string(&map).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").expect("get"), None);

        storage.set("cart", "[]").expect("set");
        assert_eq!(storage.get("cart").expect("get"), Some("[]".to_string()));

        storage.set("cart", "[1]").expect("set");
        assert_eq!(storage.get("cart").expect("get"), Some("[1]".to_string()));
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let mut writer = FileStorage::new(&path);
        writer.set("@RocketShoes:cart", "[{\"id\":1}]").expect("set");

        let reader = FileStorage::new(&path);
        assert_eq!(
            reader.get("@RocketShoes:cart").expect("get"),
            Some("[{\"id\":1}]".to_string())
        );
        assert_eq!(reader.get("other-key").expect("get"), None);
    }

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("cart").expect("get"), None);
    }

    #[test]
    fn test_file_storage_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").expect("write");

        let storage = FileStorage::new(&path);
        let err = storage.get("cart").expect_err("corrupt file");
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("store.json"));

        storage.set("a", "1").expect("set");
        storage.set("b", "2").expect("set");
        assert_eq!(storage.get("a").expect("get"), Some("1".to_string()));
        assert_eq!(storage.get("b").expect("get"), Some("2".to_string()));
    }
}
