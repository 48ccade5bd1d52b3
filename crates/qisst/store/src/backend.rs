//! Storage backends for keyed blobs
//!
//! A backend is a flat key/value store of strings, the same contract a
//! browser's local storage offers. [`JsonFileStore`] keeps one file per key;
//! [`InMemoryStore`] is used for tests and ephemeral committees.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

/// Trait for keyed blob persistence.
pub trait BlobStore {
    /// Read a blob. Returns `None` if nothing is stored under `key`.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, contents: &str) -> StoreResult<()>;

    /// Delete the blob stored under `key`, if any.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> StoreResult<()> {
        (**self).write(key, contents)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// One `<key>.json` file per blob inside a data directory.
///
/// Writes are atomic (write to `.tmp`, then rename) so an interrupted save
/// never leaves a truncated blob behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, contents: &str) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> StoreResult<usize> {
        let data = self.data.lock().map_err(|_| StoreError::LockError)?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl BlobStore for InMemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let data = self.data.lock().map_err(|_| StoreError::LockError)?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> StoreResult<()> {
        let mut data = self.data.lock().map_err(|_| StoreError::LockError)?;
        data.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut data = self.data.lock().map_err(|_| StoreError::LockError)?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert_eq!(store.read("qisst_members").unwrap(), None);

        store.write("qisst_members", "[]").unwrap();
        assert_eq!(store.read("qisst_members").unwrap().as_deref(), Some("[]"));
        assert!(store.dir().join("qisst_members.json").exists());
        assert!(!store.dir().join("qisst_members.tmp").exists());

        store.write("qisst_members", "[1]").unwrap();
        assert_eq!(store.read("qisst_members").unwrap().as_deref(), Some("[1]"));

        store.remove("qisst_members").unwrap();
        assert_eq!(store.read("qisst_members").unwrap(), None);
        store.remove("qisst_members").unwrap();
    }

    #[test]
    fn test_in_memory_store_roundtrip() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len().unwrap(), 1);

        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn BlobStore> = Box::new(InMemoryStore::new());
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
