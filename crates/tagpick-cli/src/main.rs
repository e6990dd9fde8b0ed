mod commands;
mod logging;
mod output;
mod progress;
mod prompt;
mod shell;

use std::process;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ExportArgs, SearchArgs};
use dotenv::dotenv;
use progress::CliReporter;
use prompt::PromptLocator;
use tagpick_core::{AppConfig, SearchRequest, SearchSession, SidecarTagProvider, Source};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match tagpick_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Search(search_args)) => run_search(&config, search_args),
        Some(Commands::Export(export_args)) => run_export(&config, export_args),
        Some(Commands::Volumes) => {
            for volume in config.resolve_volumes() {
                let marker = if volume.selected { "*" } else { " " };
                println!(
                    "{} {:<16} {}",
                    marker.green(),
                    volume.label.bold(),
                    volume.root.display()
                );
            }
            Ok(())
        }
        Some(Commands::Shell(shell_args)) => shell::run(&config, shell_args),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

pub(crate) fn build_session(config: &AppConfig, labels: &[String]) -> anyhow::Result<SearchSession> {
    let mut session = SearchSession::from_config(config, SidecarTagProvider::new())
        .with_reporter(CliReporter::new())
        .with_locator(PromptLocator);

    if !labels.is_empty() {
        let known: Vec<String> = session.volumes().iter().map(|v| v.label.clone()).collect();
        for label in &known {
            session.select_volume(label, false);
        }
        for label in labels {
            if !session.select_volume(label, true) {
                bail!("Unknown volume '{}', known volumes: {}", label, known.join(", "));
            }
        }
    }
    Ok(session)
}

fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let mut session = build_session(config, &args.volumes)?;

    let source = match (&args.catalog, args.use_catalog) {
        (Some(path), _) => {
            session.set_catalog_path(path);
            Source::Catalog
        }
        (None, true) => Source::Catalog,
        (None, false) => Source::LiveDisk,
    };

    let request = SearchRequest::new(args.filter)
        .with_mode(args.mode.into())
        .with_source(source)
        .with_sample_size(args.count.unwrap_or_else(|| config.sample_size.clone()));

    let outcome = session.search(&request)?;
    output::print_outcome(&outcome);
    Ok(())
}

fn run_export(config: &AppConfig, args: ExportArgs) -> anyhow::Result<()> {
    let mut config = config.clone();
    if !args.extensions.is_empty() {
        config.extensions = args.extensions;
    }
    let session = build_session(&config, &args.volumes)?;

    info!("Exporting catalog to {}", args.output.display());
    let summary = session
        .export_catalog(&args.output)
        .with_context(|| format!("exporting catalog to {}", args.output.display()))?;
    output::print_warnings(&summary.warnings);
    println!(
        "{} rows written to {}",
        summary.rows.to_string().green(),
        args.output.display()
    );
    Ok(())
}
