//! Error types for the disk cache

use crate::types::CacheOperation;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by the location resolver and the cache engine
#[derive(Debug)]
pub enum DiskCacheError {
    /// The root directory could not be resolved or created.
    DirectoryUnavailable {
        path: Option<PathBuf>,
        reason: String,
        source: Option<Box<io::Error>>,
    },
    /// No file backs the requested key.
    NotFound {
        operation: CacheOperation,
        key: String,
    },
    /// Any other filesystem failure.
    Io {
        operation: CacheOperation,
        key: Option<String>,
        source: Box<io::Error>,
    },
}

/// Coarse classification of a [`DiskCacheError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DirectoryUnavailable,
    NotFound,
    IoFailure,
}

impl DiskCacheError {
    pub(crate) fn unavailable(path: Option<PathBuf>, reason: impl Into<String>) -> Self {
        DiskCacheError::DirectoryUnavailable {
            path,
            reason: reason.into(),
            source: None,
        }
    }

    /// Maps an io error from a keyed operation, splitting out `NotFound`.
    pub(crate) fn from_io(operation: CacheOperation, key: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            DiskCacheError::NotFound {
                operation,
                key: key.to_string(),
            }
        } else {
            DiskCacheError::Io {
                operation,
                key: Some(key.to_string()),
                source: Box::new(err),
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DiskCacheError::DirectoryUnavailable { .. } => ErrorKind::DirectoryUnavailable,
            DiskCacheError::NotFound { .. } => ErrorKind::NotFound,
            DiskCacheError::Io { .. } => ErrorKind::IoFailure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The key involved in the failing operation, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            DiskCacheError::NotFound { key, .. } => Some(key),
            DiskCacheError::Io { key, .. } => key.as_deref(),
            DiskCacheError::DirectoryUnavailable { .. } => None,
        }
    }
}

impl fmt::Display for DiskCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskCacheError::DirectoryUnavailable { path, reason, .. } => match path {
                Some(path) => write!(
                    f,
                    "Cache directory unavailable ({}): {}",
                    path.display(),
                    reason
                ),
                None => write!(f, "Cache directory unavailable: {}", reason),
            },
            DiskCacheError::NotFound { operation, key } => {
                write!(f, "No cached data for key '{}' ({})", key, operation)
            }
            DiskCacheError::Io {
                operation,
                key,
                source,
            } => match key {
                Some(key) => write!(f, "IO error during {} of '{}': {}", operation, key, source),
                None => write!(f, "IO error during {}: {}", operation, source),
            },
        }
    }
}

impl std::error::Error for DiskCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiskCacheError::DirectoryUnavailable {
                source: Some(err), ..
            } => Some(err.as_ref()),
            DiskCacheError::Io { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiskCacheError>;
