use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, SearchCache};
use crate::catalog::{self, ExportSummary};
use crate::config::AppConfig;
use crate::error::Error;
use crate::filter::{FilterQuery, Mode};
use crate::pins::PinBoard;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::sampler::{self, SampleSize};
use crate::scanner::{self, WalkRules};
use crate::tags::TagProvider;
use crate::volume::{Volume, VolumeWarning};

use crate::result::{FileEntry, Origin, SearchOutcome, SearchResult};

/// Where a search reads its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Walk the selected volumes.
    #[default]
    LiveDisk,
    /// Query the session's catalog file.
    Catalog,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub filter_text: String,
    pub mode: Mode,
    pub source: Source,
    /// Parsed before any disk access; unparseable text fails the search.
    pub sample_size: String,
}

impl SearchRequest {
    pub fn new(filter_text: impl Into<String>) -> Self {
        Self {
            filter_text: filter_text.into(),
            mode: Mode::default(),
            source: Source::default(),
            sample_size: "5".to_string(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_sample_size(mut self, sample_size: impl Into<String>) -> Self {
        self.sample_size = sample_size.into();
        self
    }
}

/// Asked for a catalog location the first time a catalog search needs one.
pub trait CatalogLocator {
    fn locate(&mut self) -> Option<PathBuf>;
}

/// Locator for sessions that never search catalogs interactively.
pub struct NoCatalogLocator;

impl CatalogLocator for NoCatalogLocator {
    fn locate(&mut self) -> Option<PathBuf> {
        None
    }
}

/// State shared by the searches of one user session: known volumes, the
/// search cache, the chosen catalog, result history and pins.
///
/// Searches take `&mut self`, so two searches on one session never overlap.
pub struct SearchSession {
    volumes: Vec<Volume>,
    rules: WalkRules,
    tags: Box<dyn TagProvider>,
    locator: Box<dyn CatalogLocator>,
    reporter: Box<dyn ProgressReporter>,
    cache: SearchCache,
    catalog_path: Option<PathBuf>,
    rng: StdRng,
    history: Vec<SearchResult>,
    pins: PinBoard,
}

impl SearchSession {
    pub fn new(volumes: Vec<Volume>, rules: WalkRules, tags: impl TagProvider + 'static) -> Self {
        Self {
            volumes,
            rules,
            tags: Box::new(tags),
            locator: Box::new(NoCatalogLocator),
            reporter: Box::new(SilentReporter),
            cache: SearchCache::new(),
            catalog_path: None,
            rng: StdRng::from_entropy(),
            history: Vec::new(),
            pins: PinBoard::new(),
        }
    }

    pub fn from_config(config: &AppConfig, tags: impl TagProvider + 'static) -> Self {
        let mut session = Self::new(config.resolve_volumes(), WalkRules::from_config(config), tags);
        session.catalog_path = config.catalog_path.clone();
        session
    }

    pub fn with_locator(mut self, locator: impl CatalogLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Returns false when no volume carries `label`.
    pub fn select_volume(&mut self, label: &str, selected: bool) -> bool {
        let mut found = false;
        for volume in self.volumes.iter_mut().filter(|v| v.label == label) {
            volume.selected = selected;
            found = true;
        }
        found
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn set_catalog_path(&mut self, path: impl Into<PathBuf>) {
        self.catalog_path = Some(path.into());
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    pub fn history(&self) -> &[SearchResult] {
        &self.history
    }

    /// Drop a result from the history. Returns false if it was not recorded.
    pub fn forget(&mut self, result: &SearchResult) -> bool {
        match self.history.iter().position(|r| r == result) {
            Some(index) => {
                self.history.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pins(&self) -> &PinBoard {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut PinBoard {
        &mut self.pins
    }

    /// Run one search: collect candidates, sample them, keep the sampled
    /// files that still exist. Non-empty results are added to the history.
    pub fn search(&mut self, request: &SearchRequest) -> Result<SearchOutcome, Error> {
        let sample_size = SampleSize::parse(&request.sample_size)?;
        let filter = FilterQuery::parse(&request.filter_text);
        info!(
            "Searching for '{}' ({}) in {:?}",
            filter, request.mode, request.source
        );

        let (candidates, origin, warnings) = match request.source {
            Source::LiveDisk => {
                let (files, warnings) = self.disk_candidates(&filter, request.mode);
                let ids = self
                    .volumes
                    .iter()
                    .filter(|v| v.selected)
                    .map(Volume::display_id)
                    .collect();
                (files, Origin::Volumes(ids), warnings)
            }
            Source::Catalog => {
                let path = self.catalog_location()?;
                let files = catalog::query_catalog(&path, &filter, request.mode, &self.volumes)?;
                (files, Origin::Catalog(path), Vec::new())
            }
        };
        debug!("{} candidates before sampling", candidates.len());

        let sampled = sampler::sample(&candidates, sample_size, &mut self.rng);
        let files: BTreeSet<FileEntry> = sampled
            .into_iter()
            .filter(|path| {
                let exists = path.exists();
                if !exists {
                    debug!("Dropping vanished file {}", path.display());
                }
                exists
            })
            .map(|path| FileEntry::resolve(path, self.tags.as_ref()))
            .collect();

        if files.is_empty() {
            info!("No results for '{}'", filter);
            return Ok(SearchOutcome {
                result: None,
                warnings,
            });
        }

        let result = SearchResult {
            files,
            filter: filter.normalized(),
            origin,
            mode: request.mode,
        };
        self.history.push(result.clone());
        Ok(SearchOutcome {
            result: Some(result),
            warnings,
        })
    }

    /// Matching files on every selected volume, through the search cache.
    /// Volumes whose root cannot be read are reported and skipped.
    pub fn disk_candidates(
        &mut self,
        filter: &FilterQuery,
        mode: Mode,
    ) -> (Vec<PathBuf>, Vec<VolumeWarning>) {
        let mut candidates: Vec<PathBuf> = Vec::new();
        let mut warnings: Vec<VolumeWarning> = Vec::new();

        for volume in self.volumes.iter().filter(|v| v.selected) {
            let key = CacheKey::new(volume, filter, mode);
            let rules = &self.rules;
            let tags = self.tags.as_ref();
            let reporter = self.reporter.as_ref();
            let result = self.cache.get_or_try_compute(key, || {
                filter_volume(volume, filter, mode, rules, tags, reporter)
            });
            match result {
                Ok(files) => candidates.extend(files),
                Err(e) => {
                    warn!("Skipping volume {}: {}", volume, e);
                    warnings.push(VolumeWarning::new(volume, &e));
                }
            }
        }

        (candidates, warnings)
    }

    /// Write a catalog of the selected volumes to `output`.
    pub fn export_catalog(&self, output: &Path) -> Result<ExportSummary, Error> {
        catalog::export_catalog(
            output,
            &self.volumes,
            &self.rules,
            self.tags.as_ref(),
            self.reporter.as_ref(),
        )
    }

    fn catalog_location(&mut self) -> Result<PathBuf, Error> {
        if let Some(path) = &self.catalog_path {
            return Ok(path.clone());
        }
        match self.locator.locate() {
            Some(path) => {
                info!("Using catalog {}", path.display());
                self.catalog_path = Some(path.clone());
                Ok(path)
            }
            None => Err(Error::NoCatalogSelected),
        }
    }
}

fn filter_volume(
    volume: &Volume,
    filter: &FilterQuery,
    mode: Mode,
    rules: &WalkRules,
    tags: &dyn TagProvider,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<PathBuf>, Error> {
    reporter.on_walk_start(volume);
    let walk_start = Instant::now();
    let files = scanner::walk(&volume.root, rules, reporter)?;
    reporter.on_walk_complete(volume, files.len(), walk_start.elapsed().as_secs_f64());

    if filter.is_vacuous() {
        return Ok(files);
    }

    let total = files.len();
    let matched: Vec<PathBuf> = files
        .into_iter()
        .filter(|file| filter.matches(&tags.tags(file).into_tags(), mode))
        .collect();
    reporter.on_filter_complete(matched.len(), total);
    debug!(
        "{}: {} of {} files match '{}'",
        volume.label,
        matched.len(),
        total,
        filter
    );
    Ok(matched)
}
