//! Piece references and their validated components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a piece's payload is obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    /// Published to the public package registry.
    Registry,
    /// Privately uploaded archive held in the file store.
    Archive,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Registry => "REGISTRY",
            PackageType::Archive => "ARCHIVE",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package name, optionally scoped (`@scope/name`).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceName(String);

impl PieceName {
    /// Create from a string, validating format.
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(crate::Error::InvalidPieceName(
                "name must not be empty".to_string(),
            ));
        }
        for (i, c) in name.char_indices() {
            if c.is_whitespace() || c.is_control() || matches!(c, '=' | '#') {
                return Err(crate::Error::InvalidPieceName(format!(
                    "invalid character {c:?} in {name}"
                )));
            }
            if c == '@' && i != 0 {
                return Err(crate::Error::InvalidPieceName(format!(
                    "'@' is only allowed as a scope prefix: {name}"
                )));
            }
        }
        if let Some(scoped) = name.strip_prefix('@') {
            match scoped.split_once('/') {
                Some((scope, rest)) if !scope.is_empty() && !rest.is_empty() => {}
                _ => {
                    return Err(crate::Error::InvalidPieceName(format!(
                        "scoped name must look like @scope/name: {name}"
                    )));
                }
            }
        }
        Ok(Self(name))
    }

    /// Get the name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PieceName {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<PieceName> for String {
    fn from(value: PieceName) -> Self {
        value.0
    }
}

impl fmt::Debug for PieceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceName({self})")
    }
}

impl fmt::Display for PieceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An exact `MAJOR.MINOR.PATCH` version. Range prefixes are not accepted.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExactVersion(String);

impl ExactVersion {
    /// Create from a string, validating format.
    pub fn new(version: impl Into<String>) -> crate::Result<Self> {
        let version = version.into();
        let parts: Vec<&str> = version.split('.').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(crate::Error::InvalidVersion(format!(
                "expected MAJOR.MINOR.PATCH, got {version:?}"
            )));
        }
        Ok(Self(version))
    }

    /// Get the version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExactVersion {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<ExactVersion> for String {
    fn from(value: ExactVersion) -> Self {
        value.0
    }
}

impl fmt::Debug for ExactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExactVersion({self})")
    }
}

impl fmt::Display for ExactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File store key of an uploaded piece archive.
///
/// Restricted to `[A-Za-z0-9_-]` so that it can be used verbatim as a file
/// name under the archive cache root.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArchiveId(String);

impl ArchiveId {
    /// Create from a string, validating format.
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(crate::Error::InvalidArchiveId(
                "archive id must not be empty".to_string(),
            ));
        }
        if id.len() > crate::MAX_ARCHIVE_ID_LEN {
            return Err(crate::Error::InvalidArchiveId(format!(
                "archive id must be at most {} bytes, got {}",
                crate::MAX_ARCHIVE_ID_LEN,
                id.len()
            )));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
        {
            return Err(crate::Error::InvalidArchiveId(format!(
                "invalid character {c:?} in {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Get the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArchiveId {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<ArchiveId> for String {
    fn from(value: ArchiveId) -> Self {
        value.0
    }
}

impl fmt::Debug for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchiveId({self})")
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package-type specific part of a piece reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "packageType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    Registry,
    Archive {
        #[serde(rename = "archiveId")]
        archive_id: ArchiveId,
    },
}

/// A piece requested for installation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiecePackage {
    pub name: PieceName,
    pub version: ExactVersion,
    #[serde(flatten)]
    pub kind: PieceKind,
}

impl PiecePackage {
    /// A piece resolved from the public registry.
    pub fn registry(name: PieceName, version: ExactVersion) -> Self {
        Self {
            name,
            version,
            kind: PieceKind::Registry,
        }
    }

    /// A piece backed by a privately uploaded archive.
    pub fn archive(name: PieceName, version: ExactVersion, archive_id: ArchiveId) -> Self {
        Self {
            name,
            version,
            kind: PieceKind::Archive { archive_id },
        }
    }

    pub fn package_type(&self) -> PackageType {
        match self.kind {
            PieceKind::Registry => PackageType::Registry,
            PieceKind::Archive { .. } => PackageType::Archive,
        }
    }

    /// The archive id, for archive-backed pieces.
    pub fn archive_id(&self) -> Option<&ArchiveId> {
        match &self.kind {
            PieceKind::Registry => None,
            PieceKind::Archive { archive_id } => Some(archive_id),
        }
    }
}

impl fmt::Display for PiecePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)?;
        if let PieceKind::Archive { archive_id } = &self.kind {
            write!(f, "={archive_id}")?;
        }
        Ok(())
    }
}

/// Parses `name@version` (registry) or `name@version=archive_id` (archive).
impl FromStr for PiecePackage {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let (reference, archive_id) = match s.split_once('=') {
            Some((reference, id)) => (reference, Some(ArchiveId::new(id)?)),
            None => (s, None),
        };

        // Split on the last '@' so scoped names keep their prefix.
        let (name, version) = reference
            .rsplit_once('@')
            .filter(|(name, _)| !name.is_empty())
            .ok_or_else(|| {
                crate::Error::InvalidPieceSpec(format!("expected name@version, got {s:?}"))
            })?;

        let name = PieceName::new(name)?;
        let version = ExactVersion::new(version)?;
        Ok(match archive_id {
            Some(archive_id) => Self::archive(name, version, archive_id),
            None => Self::registry(name, version),
        })
    }
}
