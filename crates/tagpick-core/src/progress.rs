use std::path::Path;

use crate::volume::Volume;

/// Trait for reporting walk and export progress.
///
/// CLI implements with indicatif spinners. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_walk_start(&self, _volume: &Volume) {}
    fn on_walk_progress(&self, _files_found: usize, _current_path: &Path) {}
    fn on_walk_complete(&self, _volume: &Volume, _total_files: usize, _duration_secs: f64) {}
    fn on_filter_complete(&self, _matched: usize, _total: usize) {}
    fn on_catalog_write(&self, _rows: usize, _path: &Path) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
