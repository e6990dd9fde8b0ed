use std::io::{self, Write};
use std::path::PathBuf;
use tagpick_core::CatalogLocator;
use tracing::warn;

/// Asks for the catalog file on stdin.
pub struct PromptLocator;

impl CatalogLocator for PromptLocator {
    fn locate(&mut self) -> Option<PathBuf> {
        let answer = match prompt_line("Catalog file (empty to cancel): ") {
            Ok(Some(answer)) => answer,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cannot read catalog location: {}", e);
                return None;
            }
        };
        if answer.is_empty() {
            return None;
        }
        let path = PathBuf::from(answer);
        if !path.is_file() {
            warn!("{} is not a file", path.display());
            return None;
        }
        Some(path)
    }
}

/// Print `prompt` and read one trimmed line, `None` at end of input.
pub fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    let mut input = String::new();
    print!("{}", prompt);
    io::stdout().flush()?;
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
