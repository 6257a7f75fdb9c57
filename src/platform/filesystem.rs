//! File-system operations outside the engine's own package storage.
//!
//! The sandbox does not allow them, so mutations report
//! [`PlatformError::Unsupported`] and enumeration finds nothing.

use std::path::Path;
use tracing::debug;

use super::PlatformError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

pub fn mkdir(path: &Path) {
    debug!("mkdir {} ignored", path.display());
}

pub fn rmdir(path: &Path) -> Result<(), PlatformError> {
    Err(PlatformError::Unsupported(format!("rmdir {}", path.display())))
}

pub fn remove(path: &Path) -> Result<(), PlatformError> {
    Err(PlatformError::Unsupported(format!("remove {}", path.display())))
}

pub fn rename(from: &Path, to: &Path) -> Result<(), PlatformError> {
    Err(PlatformError::Unsupported(format!(
        "rename {} -> {}",
        from.display(),
        to.display()
    )))
}

/// Visit files under `root` matching `pattern`. `visit` returns false to stop
/// early. Returns true when enumeration ran to completion, which on this
/// platform is always, after visiting nothing.
pub fn enumerate_files(
    root: &Path,
    pattern: &str,
    _visit: impl FnMut(&FileEntry) -> bool,
) -> bool {
    debug!("enumerate {} in {}: no files", pattern, root.display());
    true
}
