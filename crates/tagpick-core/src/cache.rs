use ahash::AHashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use tracing::debug;

use crate::filter::{FilterQuery, Mode};
use crate::volume::Volume;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub volume: String,
    pub filter: String,
    pub mode: Mode,
}

impl CacheKey {
    pub fn new(volume: &Volume, filter: &FilterQuery, mode: Mode) -> Self {
        Self {
            volume: volume.identity(),
            filter: filter.normalized(),
            mode,
        }
    }
}

/// Filtered file lists per (volume, filter, mode), kept for the lifetime of
/// a session. Entries are never invalidated.
#[derive(Debug, Default)]
pub struct SearchCache {
    entries: AHashMap<CacheKey, Vec<PathBuf>>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list for `key`, or run `compute` and store its
    /// result. A failed computation leaves the cache untouched.
    pub fn get_or_try_compute<F, E>(&mut self, key: CacheKey, compute: F) -> Result<Vec<PathBuf>, E>
    where
        F: FnOnce() -> Result<Vec<PathBuf>, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                debug!("Search cache hit for {:?}", entry.key());
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                debug!("Search cache miss for {:?}", entry.key());
                let files = compute()?;
                Ok(entry.insert(files).clone())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
