//! Storage location types

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier for a group of cooperating processes sharing a container.
pub type AppGroupId = String;

/// A subdirectory of a [`StorageLocation`] where data is stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubDirectory {
    /// An `images` subdirectory.
    Images,
    /// A subdirectory with a caller-supplied name.
    Custom(String),
}

impl SubDirectory {
    pub fn as_str(&self) -> &str {
        match self {
            SubDirectory::Images => "images",
            SubDirectory::Custom(name) => name,
        }
    }
}

impl From<&str> for SubDirectory {
    fn from(name: &str) -> Self {
        SubDirectory::Custom(name.to_string())
    }
}

impl From<String> for SubDirectory {
    fn from(name: String) -> Self {
        SubDirectory::Custom(name)
    }
}

/// Where a cache's files physically live
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    /// The per-user cache area, which is volatile.
    Temporary(Option<SubDirectory>),
    /// The per-user documents area.
    Permanent(Option<SubDirectory>),
    /// A group container reachable by every process presenting the same group id.
    Shared(AppGroupId, Option<SubDirectory>),
}

impl StorageLocation {
    /// The subdirectory path segment, if one was configured
    pub fn subdirectory(&self) -> Option<&str> {
        match self {
            StorageLocation::Temporary(sub)
            | StorageLocation::Permanent(sub)
            | StorageLocation::Shared(_, sub) => sub.as_ref().map(SubDirectory::as_str),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StorageLocation::Temporary(_) => "temporary",
            StorageLocation::Permanent(_) => "permanent",
            StorageLocation::Shared(..) => "shared",
        }
    }
}

/// The cache operation an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOperation {
    Put,
    Get,
    Delete,
    Clear,
}

impl fmt::Display for CacheOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheOperation::Put => "put",
            CacheOperation::Get => "get",
            CacheOperation::Delete => "delete",
            CacheOperation::Clear => "clear",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdirectory_segments() {
        assert_eq!(SubDirectory::Images.as_str(), "images");
        assert_eq!(SubDirectory::from("thumbs").as_str(), "thumbs");
        assert_eq!(
            SubDirectory::from("avatars".to_string()),
            SubDirectory::Custom("avatars".to_string())
        );
    }

    #[test]
    fn test_storage_location_subdirectory() {
        assert_eq!(StorageLocation::Temporary(None).subdirectory(), None);
        assert_eq!(
            StorageLocation::Permanent(Some(SubDirectory::Images)).subdirectory(),
            Some("images")
        );
        let shared = StorageLocation::Shared("group".to_string(), Some("shared".into()));
        assert_eq!(shared.subdirectory(), Some("shared"));
        assert_eq!(shared.kind(), "shared");
    }

    #[test]
    fn test_storage_location_serialization() {
        let location = StorageLocation::Shared(
            "app-group-id".to_string(),
            Some(SubDirectory::Custom("shared".to_string())),
        );

        let json = serde_json::to_string(&location).unwrap();
        assert!(json.contains("app-group-id"));
        assert!(json.contains("custom"));

        let deserialized: StorageLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, location);
    }

    #[test]
    fn test_cache_operation_display() {
        assert_eq!(CacheOperation::Put.to_string(), "put");
        assert_eq!(CacheOperation::Clear.to_string(), "clear");
    }
}
