use std::path::Path;

use crate::result::FileEntry;

/// Files the user chose to keep around between searches.
#[derive(Debug, Default)]
pub struct PinBoard {
    entries: Vec<FileEntry>,
}

impl PinBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if an entry with the same path is already pinned.
    pub fn pin(&mut self, entry: FileEntry) -> bool {
        if self.entries.contains(&entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn unpin(&mut self, path: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.path != path);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(path: &str) -> FileEntry {
        FileEntry {
            path: PathBuf::from(path),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_pin_ignores_duplicates() {
        let mut pins = PinBoard::new();
        assert!(pins.pin(entry("/m/a.mp4")));
        assert!(!pins.pin(entry("/m/a.mp4")));
        assert!(pins.pin(entry("/m/b.avi")));
        assert_eq!(pins.entries().len(), 2);
    }

    #[test]
    fn test_unpin_by_path() {
        let mut pins = PinBoard::new();
        pins.pin(entry("/m/a.mp4"));
        assert!(!pins.unpin(Path::new("/m/zzz.mp4")));
        assert!(pins.unpin(Path::new("/m/a.mp4")));
        assert!(pins.is_empty());
    }
}
