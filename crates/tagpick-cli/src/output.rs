use colored::*;
use tagpick_core::{FileEntry, SearchOutcome, SearchResult, VolumeWarning};

pub fn print_warnings(warnings: &[VolumeWarning]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }
}

pub fn print_entries(entries: &[&FileEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let tags = entry.display_tags();
        if tags.is_empty() {
            println!("{:>3}. {}", i + 1, entry.path.display());
        } else {
            println!("{:>3}. {}  {}", i + 1, entry.path.display(), tags.dimmed());
        }
    }
}

pub fn print_result(result: &SearchResult) {
    let filter = if result.filter.is_empty() {
        "<any>".to_string()
    } else {
        result.filter.clone()
    };
    println!(
        "{} {} {} {} {}",
        "filter".cyan(),
        filter.bold(),
        result.mode.to_string().cyan(),
        "from".cyan(),
        result.origin
    );
    let entries: Vec<&FileEntry> = result.files.iter().collect();
    print_entries(&entries);
}

pub fn print_outcome(outcome: &SearchOutcome) {
    print_warnings(&outcome.warnings);
    match &outcome.result {
        Some(result) => print_result(result),
        None => println!("{}", "No results".yellow()),
    }
}
