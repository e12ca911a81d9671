//! Dependency descriptors handed to the installer.

use piecemeal_core::{ExactVersion, PieceKind, PieceName, PiecePackage};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the installer obtains a dependency from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DependencySource {
    /// A named package registry.
    Registry(String),
    /// A local archive file.
    Archive(PathBuf),
}

/// A `{name, version, source}` triple consumed by the installer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub name: PieceName,
    pub version: ExactVersion,
    pub source: DependencySource,
}

impl Dependency {
    /// Translate a piece into its dependency descriptor.
    ///
    /// Registry pieces resolve against `registry`; archive pieces point at
    /// their resolved path in the cache rooted at `archive_root`.
    pub fn from_piece(piece: &PiecePackage, archive_root: &Path, registry: &str) -> Self {
        let source = match &piece.kind {
            PieceKind::Registry => DependencySource::Registry(registry.to_string()),
            PieceKind::Archive { archive_id } => DependencySource::Archive(
                piecemeal_storage::archive_path(archive_root, archive_id),
            ),
        };
        Self {
            name: piece.name.clone(),
            version: piece.version.clone(),
            source,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            DependencySource::Registry(registry) => {
                write!(f, "{}@{} ({registry})", self.name, self.version)
            }
            DependencySource::Archive(path) => {
                write!(f, "{}@{} ({})", self.name, self.version, path.display())
            }
        }
    }
}

/// One batch of dependencies for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddRequest {
    pub path: PathBuf,
    pub dependencies: Vec<Dependency>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use piecemeal_core::ArchiveId;

    #[test]
    fn test_registry_piece_maps_to_registry_source() {
        let piece: PiecePackage = "http@1.2.0".parse().unwrap();
        let dep = Dependency::from_piece(&piece, Path::new("/cache"), "npm");

        assert_eq!(dep.name.as_str(), "http");
        assert_eq!(dep.version.as_str(), "1.2.0");
        assert_eq!(dep.source, DependencySource::Registry("npm".to_string()));
    }

    #[test]
    fn test_archive_piece_maps_to_cache_path() {
        let piece: PiecePackage = "acme@2.0.0=abc123".parse().unwrap();
        let dep = Dependency::from_piece(&piece, Path::new("/cache"), "npm");

        let expected = piecemeal_storage::archive_path(
            Path::new("/cache"),
            &ArchiveId::new("abc123").unwrap(),
        );
        assert_eq!(dep.source, DependencySource::Archive(expected));
        assert_eq!(dep.to_string(), "acme@2.0.0 (/cache/abc123.tgz)");
    }
}
