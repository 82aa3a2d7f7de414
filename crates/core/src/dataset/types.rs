//! Types for the animal catalog.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// A candidate spirit animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    /// Display name; also the string the visitor's name is scored against.
    pub name: String,
    /// Short blurb shown with the match.
    pub description: String,
}

impl AnimalRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The immutable catalog every request is matched against.
///
/// Cloning is cheap: all clones share the same records. A `Dataset` always
/// holds at least one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[AnimalRecord]>,
}

impl Dataset {
    /// Build a dataset, rejecting an empty record list.
    pub fn new(records: Vec<AnimalRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self {
            records: records.into(),
        })
    }

    /// The catalog used when the configured file cannot be loaded.
    pub fn fallback() -> Self {
        Self {
            records: vec![
                AnimalRecord::new("Elephant", "A large mammal with a trunk"),
                AnimalRecord::new("Giraffe", "The tallest land animal"),
                AnimalRecord::new("Penguin", "A flightless bird from Antarctica"),
            ]
            .into(),
        }
    }

    pub fn records(&self) -> &[AnimalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors from loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset contains no animals")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_rejected() {
        let result = Dataset::new(Vec::new());
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn test_fallback_has_three_placeholders() {
        let dataset = Dataset::fallback();
        let names: Vec<_> = dataset.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Elephant", "Giraffe", "Penguin"]);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = Dataset::new(vec![AnimalRecord::new("Cat", "Purrs")]).unwrap();
        let clone = dataset.clone();
        assert!(std::ptr::eq(dataset.records(), clone.records()));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record: AnimalRecord =
            serde_json::from_str(r#"{"name":"Owl","description":"Wise"}"#).unwrap();
        assert_eq!(record, AnimalRecord::new("Owl", "Wise"));
    }
}
