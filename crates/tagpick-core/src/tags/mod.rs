//! Tag resolution for media files.
//!
//! Reading tags never fails a scan: anything that goes wrong while resolving
//! a file's tags yields [`TagLookup::Unresolved`], which filters treat as an
//! empty tag set.

mod memory;
mod sidecar;

pub use memory::MemoryTagProvider;
pub use sidecar::SidecarTagProvider;

use std::collections::BTreeSet;
use std::path::Path;

/// Separator between tags in filter text and catalog cells.
pub const TAG_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
    Tags(BTreeSet<String>),
    Unresolved,
}

impl TagLookup {
    pub fn tags(&self) -> Option<&BTreeSet<String>> {
        match self {
            TagLookup::Tags(tags) => Some(tags),
            TagLookup::Unresolved => None,
        }
    }

    pub fn into_tags(self) -> BTreeSet<String> {
        match self {
            TagLookup::Tags(tags) => tags,
            TagLookup::Unresolved => BTreeSet::new(),
        }
    }

    /// Catalog cell form: `a;b;c`, empty when unresolved.
    pub fn joined(&self) -> String {
        let separator = TAG_SEPARATOR.to_string();
        self.tags()
            .map(|tags| {
                tags.iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(separator.as_str())
            })
            .unwrap_or_default()
    }
}

pub trait TagProvider {
    fn tags(&self, path: &Path) -> TagLookup;
}

impl<T: TagProvider + ?Sized> TagProvider for &T {
    fn tags(&self, path: &Path) -> TagLookup {
        (**self).tags(path)
    }
}

impl<T: TagProvider + ?Sized> TagProvider for Box<T> {
    fn tags(&self, path: &Path) -> TagLookup {
        (**self).tags(path)
    }
}

/// Split a `;`-separated tag cell, trimming each tag and dropping blanks.
pub fn split_tags(text: &str) -> BTreeSet<String> {
    text.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
