use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::tags::TAG_SEPARATOR;

/// How the tags of a filter combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The file carries every filter tag.
    And,
    /// The file carries at least one filter tag.
    #[default]
    Or,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Mode::And),
            "or" => Ok(Mode::Or),
            other => Err(format!("unknown mode '{}', expected 'and' or 'or'", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::And => write!(f, "AND"),
            Mode::Or => write!(f, "OR"),
        }
    }
}

/// A normalized tag filter: trimmed, blank segments removed, sorted.
///
/// The normalized text doubles as cache key and catalog query, so
/// `"b; a"` and `"a;b"` are the same filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterQuery {
    tags: Vec<String>,
}

impl FilterQuery {
    pub fn parse(text: &str) -> Self {
        let mut tags: Vec<String> = text
            .split(TAG_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        tags.sort();
        Self { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_vacuous(&self) -> bool {
        is_vacuous(&self.tags)
    }

    pub fn normalized(&self) -> String {
        let separator = TAG_SEPARATOR.to_string();
        self.tags.join(separator.as_str())
    }

    pub fn matches(&self, file_tags: &BTreeSet<String>, mode: Mode) -> bool {
        matches(file_tags, &self.tags, mode)
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

fn is_vacuous(query: &[String]) -> bool {
    query.is_empty() || (query.len() == 1 && query[0].is_empty())
}

/// Whether a file's tags satisfy `query` under `mode`. An empty query, or one
/// holding a single empty tag, matches everything.
pub fn matches(file_tags: &BTreeSet<String>, query: &[String], mode: Mode) -> bool {
    if is_vacuous(query) {
        return true;
    }
    match mode {
        Mode::Or => query.iter().any(|tag| file_tags.contains(tag)),
        Mode::And => query.iter().all(|tag| file_tags.contains(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::split_tags;

    fn q(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalization_is_order_independent() {
        assert_eq!(FilterQuery::parse("b;a"), FilterQuery::parse("a;b"));
        assert_eq!(FilterQuery::parse(" b ; a").normalized(), "a;b");
        assert_eq!(FilterQuery::parse("x;;").normalized(), "x");
    }

    #[test]
    fn test_vacuous_query_matches_everything() {
        let empty = BTreeSet::new();
        let tagged = split_tags("x;y");
        for mode in [Mode::And, Mode::Or] {
            assert!(matches(&empty, &[], mode));
            assert!(matches(&empty, &q(&[""]), mode));
            assert!(matches(&tagged, &q(&[""]), mode));
            assert!(FilterQuery::parse("  ").matches(&tagged, mode));
        }
    }

    #[test]
    fn test_or_requires_intersection() {
        let tags = split_tags("x;y");
        assert!(matches(&tags, &q(&["y", "z"]), Mode::Or));
        assert!(!matches(&tags, &q(&["z"]), Mode::Or));
        assert!(!matches(&BTreeSet::new(), &q(&["z"]), Mode::Or));
    }

    #[test]
    fn test_and_requires_superset() {
        let tags = split_tags("x;y;w");
        assert!(matches(&tags, &q(&["x", "y"]), Mode::And));
        assert!(!matches(&tags, &q(&["x", "z"]), Mode::And));
        assert!(!matches(&BTreeSet::new(), &q(&["x"]), Mode::And));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let tags = split_tags("Beach");
        assert!(!matches(&tags, &q(&["beach"]), Mode::Or));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("AND".parse::<Mode>().unwrap(), Mode::And);
        assert_eq!(" or ".parse::<Mode>().unwrap(), Mode::Or);
        assert!("xor".parse::<Mode>().is_err());
    }
}
