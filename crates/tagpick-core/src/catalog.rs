//! Catalog files: a CSV snapshot of (relative path, tags, volume label) rows
//! that lets searches run without walking the disks again.
//!
//! Columns are separated by `,` and tags inside the tag cell by `;`. Paths are
//! stored relative to their volume root and re-joined with whichever mounted
//! volume carries the same label when the catalog is queried.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::error::Error;
use crate::filter::{FilterQuery, Mode};
use crate::progress::ProgressReporter;
use crate::scanner::{self, WalkRules};
use crate::tags::{split_tags, TagProvider};
use crate::volume::{Volume, VolumeWarning};

pub const COLUMN_DELIMITER: u8 = b',';
pub const HEADER: [&str; 3] = ["Path", "Tags", "DriveName"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "DriveName")]
    pub drive_name: String,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub rows: usize,
    pub warnings: Vec<VolumeWarning>,
}

/// Walk every selected volume and build one catalog row per matching file.
/// Volumes whose root cannot be read are reported as warnings.
pub fn collect_entries(
    volumes: &[Volume],
    rules: &WalkRules,
    tags: &dyn TagProvider,
    reporter: &dyn ProgressReporter,
) -> (Vec<CatalogEntry>, Vec<VolumeWarning>) {
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut warnings: Vec<VolumeWarning> = Vec::new();

    for volume in volumes.iter().filter(|v| v.selected) {
        reporter.on_walk_start(volume);
        let walk_start = Instant::now();
        let files = match scanner::walk(&volume.root, rules, reporter) {
            Ok(files) => files,
            Err(e) => {
                warn!("Skipping volume {}: {}", volume, e);
                warnings.push(VolumeWarning::new(volume, &e));
                continue;
            }
        };
        reporter.on_walk_complete(volume, files.len(), walk_start.elapsed().as_secs_f64());

        for file in files {
            let lookup = tags.tags(&file);
            entries.push(CatalogEntry {
                path: volume.relative_path(&file).to_string_lossy().into_owned(),
                tags: lookup.joined(),
                drive_name: volume.label.clone(),
            });
        }
    }

    (entries, warnings)
}

pub fn write_catalog<W: io::Write>(writer: W, entries: &[CatalogEntry]) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(COLUMN_DELIMITER)
        .has_headers(true)
        .from_writer(writer);
    for entry in entries {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export the selected volumes to `output`. The file is written in one go
/// once every volume has been walked.
pub fn export_catalog(
    output: &Path,
    volumes: &[Volume],
    rules: &WalkRules,
    tags: &dyn TagProvider,
    reporter: &dyn ProgressReporter,
) -> Result<ExportSummary, Error> {
    let (entries, warnings) = collect_entries(volumes, rules, tags, reporter);

    let mut buffer: Vec<u8> = Vec::new();
    write_catalog(&mut buffer, &entries)?;
    fs::write(output, buffer)?;

    reporter.on_catalog_write(entries.len(), output);
    info!("Wrote {} catalog rows to {}", entries.len(), output.display());
    Ok(ExportSummary {
        rows: entries.len(),
        warnings,
    })
}

/// Read every well-formed row. Rows with the wrong column count or
/// undecodable text are skipped; a catalog with rows but none readable is
/// `CatalogUnreadable`.
pub fn read_entries<R: io::Read>(reader: R, origin: &Path) -> Result<Vec<CatalogEntry>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(COLUMN_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut malformed = 0usize;

    for (row, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!("Skipping malformed catalog row {}: {}", row + 1, e);
                malformed += 1;
                continue;
            }
        };
        if row == 0 && record.iter().eq(HEADER.iter().copied()) {
            continue;
        }
        if record.len() != HEADER.len() || record[0].is_empty() {
            debug!(
                "Skipping malformed catalog row {}: {} columns",
                row + 1,
                record.len()
            );
            malformed += 1;
            continue;
        }
        entries.push(CatalogEntry {
            path: record[0].to_string(),
            tags: record[1].to_string(),
            drive_name: record[2].to_string(),
        });
    }

    if entries.is_empty() && malformed > 0 {
        return Err(Error::CatalogUnreadable(origin.to_path_buf()));
    }
    debug!(
        "Read {} catalog rows from {} ({} malformed)",
        entries.len(),
        origin.display(),
        malformed
    );
    Ok(entries)
}

/// Absolute paths of catalog rows matching `filter`, resolved against the
/// currently mounted volumes. Rows whose volume is not mounted are dropped.
pub fn query_entries(
    entries: &[CatalogEntry],
    filter: &FilterQuery,
    mode: Mode,
    mounted: &[Volume],
) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();
    for entry in entries {
        if !filter.matches(&split_tags(&entry.tags), mode) {
            continue;
        }
        match mounted.iter().find(|v| v.label == entry.drive_name) {
            Some(volume) => found.push(volume.root.join(&entry.path)),
            None => trace!(
                "Volume '{}' not mounted, dropping {}",
                entry.drive_name,
                entry.path
            ),
        }
    }
    found
}

pub fn query_catalog(
    path: &Path,
    filter: &FilterQuery,
    mode: Mode,
    mounted: &[Volume],
) -> Result<Vec<PathBuf>, Error> {
    let file = File::open(path)?;
    let entries = read_entries(file, path)?;
    Ok(query_entries(&entries, filter, mode, mounted))
}
