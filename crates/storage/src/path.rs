//! Deterministic on-disk locations of cached archives.

use piecemeal_core::{ARCHIVE_EXTENSION, ArchiveId};
use std::path::{Path, PathBuf};

/// Resolve the cache path of an archive: `<root>/<archive_id>.tgz`.
///
/// Pure and stable across processes, so the path doubles as the cache key.
/// Archive ids are validated to a path-safe alphabet, so distinct ids never
/// share a path and no id resolves outside `root`.
pub fn archive_path(root: &Path, id: &ArchiveId) -> PathBuf {
    assert!(!id.as_str().is_empty(), "archive id must not be empty");
    root.join(format!("{id}.{ARCHIVE_EXTENSION}"))
}
