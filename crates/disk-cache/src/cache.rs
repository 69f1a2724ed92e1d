//! Key-addressed file cache
//!
//! Every operation maps onto a single filesystem call below the resolved
//! root directory. The async forms run the blocking form on tokio's shared
//! blocking pool and hold no locks, so concurrent calls may complete in any
//! order.

use crate::config::BaseDirs;
use crate::error::{DiskCacheError, Result};
use crate::location::{ensure_exists, resolve};
use crate::types::{CacheOperation, StorageLocation};
use std::fs;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Interfaces for caching and retrieving data to and from disk
pub trait Cache {
    /// Write `data` under `key`, replacing any previous contents.
    fn put_blocking(&self, data: &[u8], key: &str) -> Result<()>;

    /// Read the data stored under `key`. Fails with `NotFound` on a miss.
    fn get_blocking(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove the data stored under `key`. Fails with `NotFound` on a miss.
    fn delete_blocking(&self, key: &str) -> Result<()>;

    /// Remove the root directory and everything in it, then recreate it empty.
    fn clear_blocking(&self) -> Result<()>;

    /// The file path `key` is read from and written to.
    ///
    /// Useful for checking whether something is cached, though nothing keeps
    /// the answer true until a following call.
    fn locate(&self, key: &str) -> PathBuf;

    /// Async form of [`Cache::put_blocking`].
    ///
    /// The async forms offload to tokio's blocking pool and must be polled
    /// inside a tokio runtime.
    fn put(&self, data: Vec<u8>, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Async form of [`Cache::get_blocking`]. Requires a tokio runtime.
    fn get(&self, key: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Async form of [`Cache::delete_blocking`]. Requires a tokio runtime.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Async form of [`Cache::clear_blocking`]. Requires a tokio runtime.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

/// A cache storing one file per key below a [`StorageLocation`]'s root directory
#[derive(Debug, Clone)]
pub struct DiskCache {
    storage_location: StorageLocation,
    directory: PathBuf,
}

impl DiskCache {
    /// Create a cache using base directories from the environment
    pub fn new(storage_location: StorageLocation) -> Result<Self> {
        Self::with_base_dirs(storage_location, &BaseDirs::from_env())
    }

    /// Create a cache, resolving and creating its root directory under `base_dirs`
    pub fn with_base_dirs(storage_location: StorageLocation, base_dirs: &BaseDirs) -> Result<Self> {
        let directory = resolve(&storage_location, base_dirs)?;
        ensure_exists(&directory)?;

        info!(
            location = storage_location.kind(),
            directory = ?directory,
            "Disk cache initialized"
        );

        Ok(Self {
            storage_location,
            directory,
        })
    }

    pub fn storage_location(&self) -> &StorageLocation {
        &self.storage_location
    }

    /// The resolved root directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn checked_path(&self, operation: CacheOperation, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(DiskCacheError::Io {
                operation,
                key: Some(String::new()),
                source: Box::new(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "cache key must not be empty",
                )),
            });
        }
        Ok(self.locate(key))
    }

    fn offload<T, F>(
        &self,
        operation: CacheOperation,
        key: Option<String>,
        task: F,
    ) -> impl Future<Output = Result<T>> + Send
    where
        F: FnOnce(DiskCache) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let cache = self.clone();
        async move {
            // Dropping the returned future does not stop a started task.
            match tokio::task::spawn_blocking(move || task(cache)).await {
                Ok(result) => result,
                Err(e) => Err(DiskCacheError::Io {
                    operation,
                    key,
                    source: Box::new(io::Error::other(e)),
                }),
            }
        }
    }
}

impl Cache for DiskCache {
    fn put_blocking(&self, data: &[u8], key: &str) -> Result<()> {
        let path = self.checked_path(CacheOperation::Put, key)?;
        fs::write(&path, data).map_err(|e| DiskCacheError::Io {
            operation: CacheOperation::Put,
            key: Some(key.to_string()),
            source: Box::new(e),
        })?;
        debug!(key = %key, path = ?path, size = data.len(), "Cached data");
        Ok(())
    }

    fn get_blocking(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.checked_path(CacheOperation::Get, key)?;
        match fs::read(&path) {
            Ok(data) => {
                debug!(key = %key, path = ?path, size = data.len(), "Cache hit");
                Ok(data)
            }
            Err(e) => {
                debug!(key = %key, path = ?path, error = %e, "Cache read failed");
                Err(DiskCacheError::from_io(CacheOperation::Get, key, e))
            }
        }
    }

    fn delete_blocking(&self, key: &str) -> Result<()> {
        let path = self.checked_path(CacheOperation::Delete, key)?;
        fs::remove_file(&path)
            .map_err(|e| DiskCacheError::from_io(CacheOperation::Delete, key, e))?;
        debug!(key = %key, path = ?path, "Deleted cached data");
        Ok(())
    }

    fn clear_blocking(&self) -> Result<()> {
        match fs::remove_dir_all(&self.directory) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(DiskCacheError::Io {
                    operation: CacheOperation::Clear,
                    key: None,
                    source: Box::new(e),
                })
            }
        }
        ensure_exists(&self.directory)?;
        info!(directory = ?self.directory, "Cleared disk cache");
        Ok(())
    }

    fn locate(&self, key: &str) -> PathBuf {
        // A leading root or drive prefix stays inside the cache directory.
        let relative: PathBuf = Path::new(key)
            .components()
            .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
        self.directory.join(relative)
    }

    fn put(&self, data: Vec<u8>, key: &str) -> impl Future<Output = Result<()>> + Send {
        let key = key.to_string();
        self.offload(CacheOperation::Put, Some(key.clone()), move |cache| {
            cache.put_blocking(&data, &key)
        })
    }

    fn get(&self, key: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let key = key.to_string();
        self.offload(CacheOperation::Get, Some(key.clone()), move |cache| {
            cache.get_blocking(&key)
        })
    }

    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let key = key.to_string();
        self.offload(CacheOperation::Delete, Some(key.clone()), move |cache| {
            cache.delete_blocking(&key)
        })
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        self.offload(CacheOperation::Clear, None, |cache| cache.clear_blocking())
    }
}
