use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::{split_tags, TagLookup, TagProvider};

/// Reads tags from a `<file>.tags` text file stored beside each media file.
/// Tags are separated by `;` or line breaks.
#[derive(Debug, Clone, Default)]
pub struct SidecarTagProvider;

impl SidecarTagProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(".tags");
        PathBuf::from(name)
    }
}

impl TagProvider for SidecarTagProvider {
    fn tags(&self, path: &Path) -> TagLookup {
        let sidecar = Self::sidecar_path(path);
        match fs::read_to_string(&sidecar) {
            Ok(text) => TagLookup::Tags(split_tags(&text.replace(|c: char| c == '\r' || c == '\n', ";"))),
            Err(e) => {
                trace!("No tags for {}: {}", path.display(), e);
                TagLookup::Unresolved
            }
        }
    }
}
