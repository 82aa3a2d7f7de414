use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

/// JSON body returned for a successful match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalResponse {
    pub animal: AnimalPayload,
    /// The normalized name the match was computed for
    pub original_name: String,
    pub total_animals: usize,
    /// Size of the tie set the animal was drawn from
    pub closest_matches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPayload {
    pub name: String,
    pub description: String,
    /// Letter distance to the name; lower is closer
    pub similarity_score: u32,
}

impl AnimalResponse {
    pub fn from_match(result: MatchResult, total_animals: usize) -> Self {
        Self {
            animal: AnimalPayload {
                name: result.selected.name,
                description: result.selected.description,
                similarity_score: result.min_distance,
            },
            original_name: result.normalized_name,
            total_animals,
            closest_matches: result.tie_count,
        }
    }
}

/// JSON body returned for internal failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}
