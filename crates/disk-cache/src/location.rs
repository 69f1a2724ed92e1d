//! Resolves a storage location to its root directory

use crate::config::BaseDirs;
use crate::error::{DiskCacheError, Result};
use crate::types::StorageLocation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Namespace segment placed under every platform area.
pub const NAMESPACE: &str = "com.mobelux.cache";

/// Compute the root directory for `location` without touching the filesystem
pub fn resolve(location: &StorageLocation, base_dirs: &BaseDirs) -> Result<PathBuf> {
    let (area, missing) = match location {
        StorageLocation::Temporary(_) => (&base_dirs.temporary, "no temporary storage area"),
        StorageLocation::Permanent(_) => (&base_dirs.permanent, "no permanent storage area"),
        StorageLocation::Shared(..) => (&base_dirs.shared, "no shared container area"),
    };
    let mut path = area
        .clone()
        .ok_or_else(|| DiskCacheError::unavailable(None, missing))?;

    if let StorageLocation::Shared(group_id, _) = location {
        if !is_valid_group_id(group_id) {
            return Err(DiskCacheError::unavailable(
                Some(path),
                format!("no container for group '{}'", group_id),
            ));
        }
        path.push(group_id);
    }

    path.push(NAMESPACE);
    if let Some(sub) = location.subdirectory() {
        path.push(sub);
    }

    Ok(path)
}

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| DiskCacheError::DirectoryUnavailable {
        path: Some(path.to_path_buf()),
        reason: "failed to create directory".to_string(),
        source: Some(Box::new(e)),
    })?;
    debug!(path = ?path, "Cache directory ready");
    Ok(())
}

// A group id names exactly one directory below the containers area.
fn is_valid_group_id(group_id: &str) -> bool {
    !group_id.is_empty() && group_id != "." && group_id != ".." && !group_id.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::SubDirectory;
    use tempfile::tempdir;

    fn base_dirs() -> BaseDirs {
        BaseDirs::new("/base/Caches", "/base/Documents", "/base/Group Containers")
    }

    #[test]
    fn test_resolve_temporary() {
        let path = resolve(&StorageLocation::Temporary(None), &base_dirs()).unwrap();
        assert_eq!(path, PathBuf::from("/base/Caches/com.mobelux.cache"));
    }

    #[test]
    fn test_resolve_permanent_with_images() {
        let location = StorageLocation::Permanent(Some(SubDirectory::Images));
        let path = resolve(&location, &base_dirs()).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/base/Documents/com.mobelux.cache/images")
        );
    }

    #[test]
    fn test_resolve_shared() {
        let location = StorageLocation::Shared("app-group-id".to_string(), Some("shared".into()));
        let path = resolve(&location, &base_dirs()).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/base/Group Containers/app-group-id/com.mobelux.cache/shared")
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let location = StorageLocation::Temporary(Some("temp".into()));
        assert_eq!(
            resolve(&location, &base_dirs()).unwrap(),
            resolve(&location, &base_dirs()).unwrap()
        );
    }

    #[test]
    fn test_resolve_missing_area() {
        let err = resolve(&StorageLocation::Permanent(None), &BaseDirs::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryUnavailable);
        assert!(err.to_string().contains("no permanent storage area"));
    }

    #[test]
    fn test_resolve_invalid_group_ids() {
        for group_id in ["", ".", "..", "a/b", "a\\b"] {
            let location = StorageLocation::Shared(group_id.to_string(), None);
            let err = resolve(&location, &base_dirs()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DirectoryUnavailable, "{group_id:?}");
        }
    }

    #[test]
    fn test_ensure_exists_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c");

        ensure_exists(&path).unwrap();
        assert!(path.is_dir());

        ensure_exists(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_exists_over_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = ensure_exists(&blocker.join("child")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryUnavailable);
    }
}
