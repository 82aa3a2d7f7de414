//! Letter-frequency profiles and the distance between them.

use std::collections::BTreeMap;

/// Occurrence count of each lowercase Latin letter in a string.
///
/// Only letters that actually occur are stored; every other letter counts
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterProfile {
    counts: BTreeMap<char, u32>,
}

impl LetterProfile {
    /// Build the profile of `raw`: case-fold, then count `[a-z]` only.
    pub fn from_name(raw: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in raw.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Count for a single letter (zero when absent).
    pub fn count(&self, letter: char) -> u32 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Letters with a non-zero count, in alphabetical order.
    pub fn letters(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of letters counted.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// L1 distance: sum of per-letter absolute count differences over the
    /// union of letters in both profiles.
    pub fn distance(&self, other: &LetterProfile) -> u32 {
        let mut distance: u32 = self
            .counts
            .iter()
            .map(|(c, &n)| n.abs_diff(other.count(*c)))
            .sum();
        // Letters only the other side has
        distance += other
            .counts
            .iter()
            .filter(|(c, _)| !self.counts.contains_key(c))
            .map(|(_, &n)| n)
            .sum::<u32>();
        distance
    }
}

/// Convenience wrapper for [`LetterProfile::from_name`].
pub fn profile(raw: &str) -> LetterProfile {
    LetterProfile::from_name(raw)
}
