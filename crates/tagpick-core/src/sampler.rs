use rand::seq::index;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number of files to draw per search. Negative input counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SampleSize(usize);

impl SampleSize {
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        let count: i64 = text
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSampleSize(text.to_string()))?;
        Ok(Self(usize::try_from(count.max(0)).unwrap_or(usize::MAX)))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl FromStr for SampleSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draw `min(count, candidates.len())` elements at distinct positions,
/// uniformly over all index subsets of that size. Result order is arbitrary.
pub fn sample<T: Clone, R: Rng + ?Sized>(candidates: &[T], count: SampleSize, rng: &mut R) -> Vec<T> {
    let amount = count.get().min(candidates.len());
    if amount == 0 {
        return Vec::new();
    }
    index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect()
}
