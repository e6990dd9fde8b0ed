use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read volume root {}: {source}", root.display())]
    RootAccessDenied {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid sample size '{0}': expected a whole number")]
    InvalidSampleSize(String),

    #[error("No catalog selected")]
    NoCatalogSelected,

    #[error("Catalog {} contains no readable rows", .0.display())]
    CatalogUnreadable(PathBuf),
}
