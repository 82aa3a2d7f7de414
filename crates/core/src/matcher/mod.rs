//! Name-to-animal similarity matching.
//!
//! A visitor's name and each animal's name are reduced to letter profiles;
//! the animals at the smallest L1 distance form the tie set, and one of them
//! is picked through the injected [`TieBreaker`].

mod profile;
mod tie_break;

pub use profile::{profile, LetterProfile};
pub use tie_break::{RandomTieBreaker, SeededTieBreaker, TieBreaker};

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::dataset::AnimalRecord;
use crate::metrics::{MATCHES_TOTAL, MATCH_DISTANCE, MATCH_TIES};

/// Name used when the caller supplies nothing but whitespace.
pub const ANONYMOUS_NAME: &str = "anonymous";

/// An animal together with its distance from the caller's profile.
#[derive(Debug, Clone, Copy)]
pub struct ScoredAnimal<'a> {
    pub animal: &'a AnimalRecord,
    pub distance: u32,
}

/// Outcome of matching one name against the dataset.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub selected: AnimalRecord,
    pub min_distance: u32,
    /// Number of animals sharing `min_distance` (always at least 1).
    pub tie_count: usize,
    pub normalized_name: String,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Animal dataset is empty")]
    EmptyDataset,
}

/// Trim the raw name, substituting [`ANONYMOUS_NAME`] when nothing is left.
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Score every animal against the caller's profile, in dataset order.
pub fn score<'a>(caller: &LetterProfile, animals: &'a [AnimalRecord]) -> Vec<ScoredAnimal<'a>> {
    animals
        .iter()
        .map(|animal| ScoredAnimal {
            animal,
            distance: caller.distance(&LetterProfile::from_name(&animal.name)),
        })
        .collect()
}

/// Similarity matcher with a pluggable tie-break source.
#[derive(Clone)]
pub struct Matcher {
    tie_breaker: Arc<dyn TieBreaker>,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("tie_breaker", &"<tie_breaker>")
            .finish()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(RandomTieBreaker))
    }
}

impl Matcher {
    pub fn new(tie_breaker: Arc<dyn TieBreaker>) -> Self {
        Self { tie_breaker }
    }

    /// Matcher with reproducible tie-breaks when `seed` is set, thread-local
    /// randomness otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(Arc::new(SeededTieBreaker::new(seed))),
            None => Self::default(),
        }
    }

    /// Find the closest animal for `raw_name`.
    ///
    /// `min_distance` and the tie set depend only on the name and the
    /// dataset; the tie breaker decides which tied animal is returned.
    pub fn find_match(
        &self,
        raw_name: &str,
        animals: &[AnimalRecord],
    ) -> Result<MatchResult, MatchError> {
        let normalized_name = normalize_name(raw_name);
        let caller = LetterProfile::from_name(&normalized_name);
        let scored = score(&caller, animals);

        let min_distance = scored
            .iter()
            .map(|s| s.distance)
            .min()
            .ok_or(MatchError::EmptyDataset)?;

        let ties: Vec<&AnimalRecord> = scored
            .iter()
            .filter(|s| s.distance == min_distance)
            .map(|s| s.animal)
            .collect();
        let tie_count = ties.len();

        // Clamp so a misbehaving tie breaker cannot index out of bounds
        let index = self.tie_breaker.pick(tie_count).min(tie_count - 1);
        let selected = ties[index].clone();

        MATCHES_TOTAL.inc();
        MATCH_DISTANCE.observe(f64::from(min_distance));
        MATCH_TIES.observe(tie_count as f64);
        debug!(
            name = %normalized_name,
            animal = %selected.name,
            min_distance,
            tie_count,
            "Matched name to animal"
        );

        Ok(MatchResult {
            selected,
            min_distance,
            tie_count,
            normalized_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, FixedTieBreaker};

    fn cat_tac_dog() -> Vec<AnimalRecord> {
        fixtures::records(&["Cat", "Tac", "Dog"])
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Ada  "), "Ada");
        assert_eq!(normalize_name(""), "anonymous");
        assert_eq!(normalize_name(" \t\n"), "anonymous");
        assert_eq!(normalize_name("!!!"), "!!!");
    }

    #[test]
    fn test_example_tie_between_anagrams() {
        let animals = cat_tac_dog();
        let result = Matcher::default().find_match("act", &animals).unwrap();

        assert_eq!(result.min_distance, 0);
        assert_eq!(result.tie_count, 2);
        assert!(["Cat", "Tac"].contains(&result.selected.name.as_str()));
        assert_eq!(result.normalized_name, "act");
    }

    #[test]
    fn test_fixed_tie_breaker_selects_by_index() {
        let animals = cat_tac_dog();
        let first = Matcher::new(Arc::new(FixedTieBreaker::new(0)))
            .find_match("act", &animals)
            .unwrap();
        let second = Matcher::new(Arc::new(FixedTieBreaker::new(1)))
            .find_match("act", &animals)
            .unwrap();
        assert_eq!(first.selected.name, "Cat");
        assert_eq!(second.selected.name, "Tac");
    }

    #[test]
    fn test_out_of_range_pick_is_clamped() {
        let animals = cat_tac_dog();
        let result = Matcher::new(Arc::new(FixedTieBreaker::new(99)))
            .find_match("act", &animals)
            .unwrap();
        assert_eq!(result.selected.name, "Tac");
    }

    #[test]
    fn test_unique_winner() {
        let animals = cat_tac_dog();
        let result = Matcher::default().find_match("  God ", &animals).unwrap();
        assert_eq!(result.selected.name, "Dog");
        assert_eq!(result.tie_count, 1);
        assert_eq!(result.normalized_name, "God");
    }

    #[test]
    fn test_blank_name_matches_as_anonymous() {
        let animals = fixtures::records(&["Anonymous Owl", "Yak"]);
        let blank = Matcher::default().find_match("   ", &animals).unwrap();
        let explicit = Matcher::default().find_match("anonymous", &animals).unwrap();
        assert_eq!(blank.normalized_name, "anonymous");
        assert_eq!(blank.min_distance, explicit.min_distance);
        assert_eq!(blank.selected, explicit.selected);
    }

    #[test]
    fn test_symbol_only_name_scores_as_empty_profile() {
        let animals = cat_tac_dog();
        let result = Matcher::default().find_match("1234", &animals).unwrap();
        assert_eq!(result.normalized_name, "1234");
        assert_eq!(result.min_distance, 3);
        assert_eq!(result.tie_count, 3);
    }

    #[test]
    fn test_empty_dataset_is_error() {
        let result = Matcher::default().find_match("act", &[]);
        assert!(matches!(result, Err(MatchError::EmptyDataset)));
    }

    #[test]
    fn test_score_preserves_dataset_order() {
        let animals = cat_tac_dog();
        let scored = score(&profile("act"), &animals);
        let distances: Vec<_> = scored.iter().map(|s| s.distance).collect();
        assert_eq!(distances, vec![0, 0, 6]);
        assert_eq!(scored[2].animal.name, "Dog");
    }
}
