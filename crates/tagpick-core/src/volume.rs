use std::fmt;
use std::path::{Path, PathBuf};

use crate::platform;

/// A mounted storage device that can take part in a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub root: PathBuf,
    pub label: String,
    pub selected: bool,
}

impl Volume {
    pub fn new(root: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Full identity used to key cached search results. Drive letters can be
    /// reassigned between mounts, so label and root are both part of it.
    pub fn identity(&self) -> String {
        format!("{}|{}", self.label, self.root.display())
    }

    /// Short identifier shown in results: the drive letter where the platform
    /// has one, the label otherwise.
    pub fn display_id(&self) -> String {
        match platform::get_drive_letter(&self.root) {
            Some(letter) => letter.to_string_lossy().into_owned(),
            None => self.label.clone(),
        }
    }

    /// Path of `file` relative to this volume's root.
    pub fn relative_path(&self, file: &Path) -> PathBuf {
        match file.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => platform::get_path_without_root(file),
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.root.display())
    }
}

/// A volume that could not contribute to a search or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeWarning {
    pub label: String,
    pub root: PathBuf,
    pub message: String,
}

impl VolumeWarning {
    pub fn new(volume: &Volume, err: &crate::Error) -> Self {
        Self {
            label: volume.label.clone(),
            root: volume.root.clone(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for VolumeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}
