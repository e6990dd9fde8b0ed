use ahash::AHashMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::{split_tags, TagLookup, TagProvider};

/// Fixed path → tags table. Paths missing from the table are unresolved.
#[derive(Debug, Clone, Default)]
pub struct MemoryTagProvider {
    tags: AHashMap<PathBuf, BTreeSet<String>>,
}

impl MemoryTagProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` with a `;`-separated tag list.
    pub fn with_tags(mut self, path: impl Into<PathBuf>, tags: &str) -> Self {
        self.insert(path, tags);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, tags: &str) {
        self.tags.insert(path.into(), split_tags(tags));
    }
}

impl TagProvider for MemoryTagProvider {
    fn tags(&self, path: &Path) -> TagLookup {
        match self.tags.get(path) {
            Some(tags) => TagLookup::Tags(tags.clone()),
            None => TagLookup::Unresolved,
        }
    }
}
