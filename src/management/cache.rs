use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::CacheError;

/// Number of hex digits of the key digest used as directory name.
const DIR_PREFIX_LEN: usize = 4;

/// Key/value store for raw API responses.
///
/// Keys are opaque strings chosen by the caller, typically a request URL or
/// `album:<id>`. Entries never expire; they live until deleted.
///
/// Reading and writing are optimizations only. Callers go through
/// [`try_get`](ResponseCache::try_get) and [`try_set`](ResponseCache::try_set),
/// which log failures and never surface them.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns `Ok(None)` when no entry exists for `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, data: &[u8]) -> Result<(), CacheError>;

    /// Removes the entry for `key`. Deleting a missing entry succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn try_get(&self, key: &str) -> Option<Vec<u8>> {
        match self.get(key).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    async fn try_set(&self, key: &str, data: &[u8]) {
        if let Err(e) = self.set(key, data).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }
}

/// File-per-entry cache below a base directory.
///
/// The SHA-256 hex digest of the key decides where an entry lives: the first
/// four digits name a directory, the remaining digits the file inside it.
pub struct DiskCache {
    base_dir: PathBuf,
}

impl DiskCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a cache in the configured cache directory.
    pub fn default_location() -> Self {
        Self::new(crate::config::cache_dir())
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Returns the directory and file path of the entry for `key`.
    pub fn entry_path(&self, key: &str) -> (PathBuf, PathBuf) {
        let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
        let (dir_name, file_name) = digest.split_at(DIR_PREFIX_LEN);

        let dir_path = self.base_dir.join(dir_name);
        let file_path = dir_path.join(file_name);
        (dir_path, file_path)
    }
}

#[async_trait]
impl ResponseCache for DiskCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let (_, path) = self.entry_path(key);
        match async_fs::read(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, data: &[u8]) -> Result<(), CacheError> {
        let (dir_path, path) = self.entry_path(key);
        async_fs::create_dir_all(&dir_path)
            .await
            .map_err(|source| CacheError::Io {
                path: dir_path.clone(),
                source,
            })?;

        async_fs::write(&path, data)
            .await
            .map_err(|source| CacheError::Io { path, source })
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let (_, path) = self.entry_path(key);
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}
