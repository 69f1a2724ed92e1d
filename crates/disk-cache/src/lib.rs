//! Key-addressed file cache
//!
//! Stores binary blobs as one file per key under a root directory chosen by
//! a [`StorageLocation`]: a volatile per-user cache area, a durable per-user
//! documents area, or a container shared by processes in the same group.

mod cache;
mod config;
mod error;
mod location;
mod types;

pub use cache::{Cache, DiskCache};
pub use config::{BaseDirs, PERMANENT_DIR_VAR, SHARED_DIR_VAR, TEMPORARY_DIR_VAR};
pub use error::{DiskCacheError, ErrorKind, Result};
pub use location::{ensure_exists, resolve, NAMESPACE};
pub use types::{AppGroupId, CacheOperation, StorageLocation, SubDirectory};
