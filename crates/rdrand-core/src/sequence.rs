//! Non-repeating sequences of bounded integers.
//!
//! Candidates come from [`crate::bounded`]; a candidate already in the set is
//! discarded and another is drawn until the set holds `length` values. The
//! length is checked against the bound before anything is drawn, so the loop
//! always has enough distinct values to finish. The expected number of draws
//! grows sharply as `length` approaches the bound; intended use keeps
//! `length` well below it.

use serde::Serialize;

use crate::bounded::{uniform_below, uniform_upto};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::source::EntropySource;

/// Boundary used by the CLI `range` command when none is given.
pub const DEFAULT_BOUNDARY: i32 = 90;

/// Value range of a sampled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Bound {
    /// Values in `[0, below)`; at most `below` values per set.
    Below(i32),
    /// Values in `[0, boundary]`; at most `boundary` values per set.
    Boundary(i32),
}

impl Bound {
    /// Largest permitted sequence length.
    pub fn max_length(&self) -> Result<usize> {
        match *self {
            Self::Below(b) | Self::Boundary(b) if b >= 0 => Ok(b as usize),
            Self::Below(b) | Self::Boundary(b) => Err(Error::InvalidBound {
                bound: i64::from(b),
            }),
        }
    }

    /// Whether `value` lies in this range.
    pub fn contains(&self, value: i32) -> bool {
        match *self {
            Self::Below(b) => (0..b).contains(&value),
            Self::Boundary(b) => (0..=b).contains(&value),
        }
    }

    /// Reject a length before any entropy is drawn.
    pub fn check_length(&self, length: usize) -> Result<()> {
        let limit = self.max_length()?;
        if length > limit {
            return Err(Error::InvalidLength { length, limit });
        }
        Ok(())
    }

    fn draw<S: EntropySource + ?Sized>(&self, source: &S, policy: &RetryPolicy) -> Result<i32> {
        match *self {
            Self::Below(b) => uniform_below(source, policy, b),
            Self::Boundary(b) => uniform_upto(source, policy, b),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Below(b) => write!(f, "[0, {b})"),
            Self::Boundary(b) => write!(f, "[0, {b}]"),
        }
    }
}

/// Pairwise-distinct values, in the order they were drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleSet {
    values: Vec<i32>,
    bound: Bound,
}

impl SampleSet {
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.values
    }
}

impl IntoIterator for SampleSet {
    type Item = i32;
    type IntoIter = std::vec::IntoIter<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Independently drawn sample sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleBatch {
    sets: Vec<SampleSet>,
}

impl SampleBatch {
    pub fn sets(&self) -> &[SampleSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleSet> {
        self.sets.iter()
    }

    pub fn into_vec(self) -> Vec<SampleSet> {
        self.sets
    }
}

/// `length` distinct values within `bound`.
pub fn sample_distinct<S>(
    source: &S,
    policy: &RetryPolicy,
    length: usize,
    bound: Bound,
) -> Result<SampleSet>
where
    S: EntropySource + ?Sized,
{
    bound.check_length(length)?;
    fill(source, policy, length, bound)
}

/// `amount` independent sets of `length` distinct values within `bound`.
///
/// Any failure aborts the whole batch.
pub fn sample_batch<S>(
    source: &S,
    policy: &RetryPolicy,
    length: usize,
    bound: Bound,
    amount: usize,
) -> Result<SampleBatch>
where
    S: EntropySource + ?Sized,
{
    bound.check_length(length)?;
    let sets = (0..amount)
        .map(|_| fill(source, policy, length, bound))
        .collect::<Result<Vec<_>>>()?;
    Ok(SampleBatch { sets })
}

fn fill<S>(source: &S, policy: &RetryPolicy, length: usize, bound: Bound) -> Result<SampleSet>
where
    S: EntropySource + ?Sized,
{
    let mut values: Vec<i32> = Vec::with_capacity(length);
    let mut rejected = 0usize;

    while values.len() < length {
        let candidate = bound.draw(source, policy)?;
        if values.contains(&candidate) {
            rejected += 1;
        } else {
            values.push(candidate);
        }
    }

    if rejected > 0 {
        log::debug!("{length} value(s) in {bound}: rejected {rejected} duplicate(s)");
    }
    Ok(SampleSet { values, bound })
}
