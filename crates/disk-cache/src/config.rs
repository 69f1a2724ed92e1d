//! Platform storage areas, configured from environment variables

use std::env;
use std::path::PathBuf;

pub const TEMPORARY_DIR_VAR: &str = "DISK_CACHE_TEMPORARY_DIR";
pub const PERMANENT_DIR_VAR: &str = "DISK_CACHE_PERMANENT_DIR";
pub const SHARED_DIR_VAR: &str = "DISK_CACHE_SHARED_DIR";

/// Directory name that holds one container per shared group.
pub const GROUP_CONTAINERS: &str = "Group Containers";

/// Base directories for each storage location kind.
///
/// `None` means the platform offers no addressable location of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseDirs {
    pub temporary: Option<PathBuf>,
    pub permanent: Option<PathBuf>,
    pub shared: Option<PathBuf>,
}

impl BaseDirs {
    pub fn new(
        temporary: impl Into<PathBuf>,
        permanent: impl Into<PathBuf>,
        shared: impl Into<PathBuf>,
    ) -> Self {
        Self {
            temporary: Some(temporary.into()),
            permanent: Some(permanent.into()),
            shared: Some(shared.into()),
        }
    }

    /// Parse base directories from environment variables, falling back to the
    /// OS per-user directories
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);

        let temporary = var(TEMPORARY_DIR_VAR).or_else(dirs::cache_dir);

        let permanent = var(PERMANENT_DIR_VAR)
            .or_else(dirs::document_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")));

        let shared = var(SHARED_DIR_VAR).or_else(default_group_containers);

        Self {
            temporary,
            permanent,
            shared,
        }
    }
}

#[cfg(target_os = "macos")]
fn default_group_containers() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join(GROUP_CONTAINERS))
}

#[cfg(not(target_os = "macos"))]
fn default_group_containers() -> Option<PathBuf> {
    dirs::data_dir().map(|data| data.join(GROUP_CONTAINERS))
}
