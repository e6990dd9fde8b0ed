use glob::Pattern;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::error::Error;
use crate::progress::ProgressReporter;

const PROGRESS_INTERVAL: usize = 256;

/// Which files a walk yields and which subtrees it skips.
#[derive(Debug, Clone)]
pub struct WalkRules {
    extensions: Vec<String>,
    reserved_dirs: Vec<String>,
    ignore_patterns: Vec<Pattern>,
}

impl WalkRules {
    /// Extensions may be given with or without the leading dot. Matching is
    /// case-sensitive.
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            reserved_dirs: Vec::new(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.extensions)
            .with_reserved_dirs(&config.reserved_dirs)
            .with_ignore_globs(&config.ignore_patterns)
    }

    pub fn with_reserved_dirs(mut self, names: &[String]) -> Self {
        self.reserved_dirs = names.to_vec();
        self
    }

    /// Invalid patterns are logged and dropped.
    pub fn with_ignore_globs(mut self, globs: &[String]) -> Self {
        self.ignore_patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let reserved = path.components().any(|comp| match comp {
            Component::Normal(name) => self
                .reserved_dirs
                .iter()
                .any(|marker| name.to_string_lossy().eq_ignore_ascii_case(marker)),
            _ => false,
        });
        reserved
            || self
                .ignore_patterns
                .iter()
                .any(|pattern| pattern.matches_path(path))
    }

    fn accepts(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => self.extensions.iter().any(|allowed| ext == OsStr::new(allowed)),
            None => false,
        }
    }
}

/// Depth-first listing of files under `root` whose extension is allowed.
///
/// A root that cannot be read fails with `RootAccessDenied`. Unreadable
/// subdirectories are skipped and the walk carries on with their siblings.
/// Symlinked directories are not followed.
pub fn walk(
    root: &Path,
    rules: &WalkRules,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<PathBuf>, Error> {
    fs::read_dir(root).map_err(|source| Error::RootAccessDenied {
        root: root.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !rules.is_excluded(entry.path()));

    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                debug!(
                    "Skipping unreadable entry {}: {}",
                    err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    err
                );
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && rules.accepts(entry.path()) {
            files.push(entry.into_path());
            if files.len() % PROGRESS_INTERVAL == 0 {
                if let Some(last) = files.last() {
                    reporter.on_walk_progress(files.len(), last);
                }
            }
        }
    }

    Ok(files)
}
