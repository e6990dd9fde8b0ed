pub mod cache;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pins;
pub mod platform;
pub mod progress;
pub mod result;
pub mod sampler;
pub mod scanner;
pub mod tags;
pub mod volume;

pub use config::AppConfig;
pub use engine::{CatalogLocator, SearchRequest, SearchSession, Source};
pub use error::Error;
pub use filter::{FilterQuery, Mode};
pub use progress::{ProgressReporter, SilentReporter};
pub use result::{FileEntry, Origin, SearchOutcome, SearchResult};
pub use sampler::SampleSize;
pub use tags::{MemoryTagProvider, SidecarTagProvider, TagLookup, TagProvider};
pub use volume::{Volume, VolumeWarning};
