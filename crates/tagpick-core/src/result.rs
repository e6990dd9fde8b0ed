use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::filter::Mode;
use crate::tags::TagProvider;
use crate::volume::VolumeWarning;

/// A sampled file with the tags it carried when the result was assembled.
/// Identity is the path alone.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub tags: Vec<String>,
}

impl FileEntry {
    pub fn resolve(path: PathBuf, provider: &dyn TagProvider) -> Self {
        let tags = provider.tags(&path).into_tags().into_iter().collect();
        Self { path, tags }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_tags(&self) -> String {
        self.tags.join("; ")
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileEntry {}

impl Hash for FileEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for FileEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

/// Where the candidates of a search came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Drive identifiers of the volumes that were walked.
    Volumes(Vec<String>),
    Catalog(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Volumes(ids) => write!(f, "volumes {}", ids.join(";")),
            Origin::Catalog(path) => write!(f, "catalog {}", path.display()),
        }
    }
}

/// One non-empty search: the sampled files plus how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub files: BTreeSet<FileEntry>,
    pub filter: String,
    pub origin: Origin,
    pub mode: Mode,
}

#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// `None` when nothing matched or no sampled file still exists.
    pub result: Option<SearchResult>,
    pub warnings: Vec<VolumeWarning>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.result.is_none()
    }
}
