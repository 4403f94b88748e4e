// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key-value persistence
//!
//! Overwrite-on-write, no transactions. Values are opaque strings; callers
//! do their own serialization.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;

use crate::error::{Error, ErrorContext, Result};

lazy_static! {
    static ref KEY_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
}

/// Persistence collaborator
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<dir>/<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !KEY_PATTERN.is_match(key) {
            return Err(Error::storage(format!("Invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let target = path.display().to_string();
        fs::create_dir_all(&self.dir).context(&target)?;

        // Readers never observe a partially written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).context(&target)?;
        fs::rename(&tmp, &path).context(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("httpClientRequests").unwrap(), None);
        store.set("httpClientRequests", "[]").unwrap();
        assert_eq!(
            store.get("httpClientRequests").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("nested/httpClientRequests.json").exists());
        assert!(!dir.path().join("nested/httpClientRequests.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.set("../escape", "x").unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_file_store_write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = FileStore::new(&blocker);

        let err = store.set("httpClientRequests", "[]").unwrap_err();

        assert!(err.is_storage());
        assert!(err.to_string().contains("httpClientRequests.json"));
        assert_eq!(store.dir(), blocker.as_path());
    }
}
