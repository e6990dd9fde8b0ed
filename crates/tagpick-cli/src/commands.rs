use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tagpick")]
#[command(about = "Pick random tagged videos from your drives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sample files whose tags match a filter
    Search(SearchArgs),
    /// Write a catalog of the selected volumes
    Export(ExportArgs),
    /// List known volumes
    Volumes,
    /// Interactive session that keeps its cache, catalog, history and pins
    Shell(ShellArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    And,
    Or,
}

impl From<ModeArg> for tagpick_core::Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::And => tagpick_core::Mode::And,
            ModeArg::Or => tagpick_core::Mode::Or,
        }
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Tags separated by ';' (empty matches every file)
    #[arg(short, long, default_value = "")]
    pub filter: String,
    #[arg(short, long, value_enum, default_value_t = ModeArg::Or)]
    pub mode: ModeArg,
    /// Number of files to pick (defaults to the configured sample size)
    #[arg(short, long, allow_hyphen_values = true)]
    pub count: Option<String>,
    /// Volume labels to search (defaults to the volumes selected in config)
    #[arg(short, long = "volume")]
    pub volumes: Vec<String>,
    /// Query this catalog instead of walking the volumes
    #[arg(long, conflicts_with = "use_catalog")]
    pub catalog: Option<PathBuf>,
    /// Query the configured catalog, asking for its location if there is none
    #[arg(long)]
    pub use_catalog: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Catalog file to write
    #[arg(short, long)]
    pub output: PathBuf,
    /// Volume labels to export (defaults to the volumes selected in config)
    #[arg(short, long = "volume")]
    pub volumes: Vec<String>,
    /// Extensions to include, e.g. .mp4 (defaults to the configured list)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Volume labels to search (defaults to the volumes selected in config)
    #[arg(short, long = "volume")]
    pub volumes: Vec<String>,
    /// Catalog to use for ':source catalog'
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_args(argv: &[&str]) -> SearchArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Search(args)) => args,
            other => panic!("expected search command, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_is_accepted() {
        let args = search_args(&["tagpick", "search", "--filter", "x", "--count", "-3"]);
        assert_eq!(args.count.as_deref(), Some("-3"));
        assert_eq!(
            tagpick_core::SampleSize::parse(args.count.as_deref().unwrap())
                .unwrap()
                .get(),
            0
        );
    }

    #[test]
    fn test_search_defaults() {
        let args = search_args(&["tagpick", "search", "-v", "OS", "-v", "USB"]);
        assert_eq!(args.filter, "");
        assert!(matches!(args.mode, ModeArg::Or));
        assert!(args.count.is_none());
        assert_eq!(args.volumes, vec!["OS", "USB"]);
    }

    #[test]
    fn test_catalog_conflicts_with_use_catalog() {
        let result = Cli::try_parse_from([
            "tagpick",
            "search",
            "--catalog",
            "c.csv",
            "--use-catalog",
        ]);
        assert!(result.is_err());
    }
}
