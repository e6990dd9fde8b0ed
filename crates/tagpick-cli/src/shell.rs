use colored::*;
use std::path::PathBuf;
use tagpick_core::{AppConfig, FileEntry, Mode, SearchRequest, SearchSession, Source};
use tracing::error;

use crate::commands::ShellArgs;
use crate::output;
use crate::prompt::prompt_line;

const HELP: &str = "\
<tags>          search, tags separated by ';' (empty line matches everything)
:mode and|or    how tags combine
:count <n>      files per search
:source disk|catalog
:pin <n>        pin file <n> of the last result
:unpin <n>      unpin pin <n>
:pins           list pins
:history        list earlier results
:forget <n>     drop result <n> from the history
:quit";

struct ShellState {
    mode: Mode,
    count: String,
    source: Source,
    last: Vec<FileEntry>,
}

pub fn run(config: &AppConfig, args: ShellArgs) -> anyhow::Result<()> {
    let mut session = crate::build_session(config, &args.volumes)?;
    if let Some(catalog) = args.catalog {
        session.set_catalog_path(catalog);
    }
    let mut state = ShellState {
        mode: Mode::Or,
        count: config.sample_size.clone(),
        source: Source::LiveDisk,
        last: Vec::new(),
    };

    println!("{}", HELP.dimmed());
    loop {
        let Some(line) = prompt_line(&format!("{} ", "tagpick>".cyan()))? else {
            break;
        };
        match line.split_once(' ').unwrap_or((line.as_str(), "")) {
            (":quit", _) | (":q", _) => break,
            (":mode", value) => match value.parse::<Mode>() {
                Ok(mode) => state.mode = mode,
                Err(e) => println!("{}", e.red()),
            },
            (":count", value) => state.count = value.trim().to_string(),
            (":source", "disk") => state.source = Source::LiveDisk,
            (":source", "catalog") => state.source = Source::Catalog,
            (":pin", value) => match pick(&state.last, value) {
                Some(entry) => {
                    if !session.pins_mut().pin(entry.clone()) {
                        println!("Already pinned");
                    }
                }
                None => println!("{}", "No such file in the last result".red()),
            },
            (":unpin", value) => {
                let path: Option<PathBuf> =
                    pick(session.pins().entries(), value).map(|e| e.path.clone());
                match path {
                    Some(path) => {
                        session.pins_mut().unpin(&path);
                    }
                    None => println!("{}", "No such pin".red()),
                }
            }
            (":pins", _) => {
                let entries: Vec<&FileEntry> = session.pins().entries().iter().collect();
                output::print_entries(&entries);
            }
            (":history", _) => {
                for (i, result) in session.history().iter().enumerate() {
                    println!("{}", format!("#{}", i + 1).bold());
                    output::print_result(result);
                }
            }
            (":forget", value) => {
                let result = pick(session.history(), value).cloned();
                match result {
                    Some(result) => {
                        session.forget(&result);
                    }
                    None => println!("{}", "No such result".red()),
                }
            }
            (cmd, _) if cmd.starts_with(':') => println!("{}", HELP.dimmed()),
            _ => search(&mut session, &mut state, &line),
        }
    }
    Ok(())
}

fn search(session: &mut SearchSession, state: &mut ShellState, filter: &str) {
    let request = SearchRequest::new(filter)
        .with_mode(state.mode)
        .with_source(state.source)
        .with_sample_size(state.count.clone());
    match session.search(&request) {
        Ok(outcome) => {
            output::print_outcome(&outcome);
            state.last = outcome
                .result
                .map(|r| r.files.into_iter().collect())
                .unwrap_or_default();
        }
        Err(e) => error!("Search failed: {}", e),
    }
}

/// Item `index` (1-based, as printed) of `items`.
fn pick<'a, T>(items: &'a [T], index: &str) -> Option<&'a T> {
    let n: usize = index.trim().parse().ok()?;
    items.get(n.checked_sub(1)?)
}
