use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tagpick_core::{ProgressReporter, Volume};

/// CLI progress reporter: one spinner per volume walk.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_walk_start(&self, volume: &Volume) {
        self.set_bar(Self::spinner(format!("Scanning {}...", volume)));
    }

    fn on_walk_progress(&self, files_found: usize, _current_path: &Path) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_message(format!("Scanning... {} files found", files_found));
            }
        }
    }

    fn on_walk_complete(&self, volume: &Volume, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m {}: {} files in {:.2}s",
            volume.label, total_files, duration_secs
        );
    }

    fn on_filter_complete(&self, matched: usize, total: usize) {
        eprintln!("  \x1b[32m✓\x1b[0m {} of {} files match", matched, total);
    }

    fn on_catalog_write(&self, rows: usize, path: &Path) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Catalog written: {} rows to {}",
            rows,
            path.display()
        );
    }
}
