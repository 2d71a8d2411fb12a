use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Upload constraints consumed by the upload handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSettings {
    directory: PathBuf,
    max_bytes: u64,
    allowed_extensions: BTreeSet<String>,
}

impl UploadSettings {
    pub(crate) const fn new(
        directory: PathBuf,
        max_bytes: u64,
        allowed_extensions: BTreeSet<String>,
    ) -> Self {
        Self {
            directory,
            max_bytes,
            allowed_extensions,
        }
    }

    /// Absolute path of the upload directory; it exists once resolution succeeded.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Lower-case extensions without the leading dot.
    pub const fn allowed_extensions(&self) -> &BTreeSet<String> {
        &self.allowed_extensions
    }

    /// Whether `file_name` ends in one of the allowed extensions (case-insensitive).
    pub fn allows_file(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.allowed_extensions.contains(&ext.to_ascii_lowercase()))
    }
}

/// Named spatial reference identifiers (SRIDs), e.g. `WGS84 -> 4326`.
///
/// The codes are opaque: only positivity is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpatialReferences(BTreeMap<String, u32>);

impl SpatialReferences {
    pub(crate) const fn new(ids: BTreeMap<String, u32>) -> Self {
        Self(ids)
    }

    /// Look up an SRID by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(&name.to_ascii_uppercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub const fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.0
    }
}
