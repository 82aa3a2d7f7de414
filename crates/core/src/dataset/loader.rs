use std::path::Path;

use tracing::{error, info, warn};

use super::{AnimalRecord, Dataset, DatasetError};

/// Load the catalog from a JSON file, substituting the fallback catalog on
/// any failure. Never fails; the cause is logged for operators.
pub fn load_dataset(path: &Path) -> Dataset {
    match try_load_dataset(path) {
        Ok(dataset) => {
            info!(path = %path.display(), animals = dataset.len(), "Loaded animal dataset");
            dataset
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error loading animal dataset");
            let fallback = Dataset::fallback();
            warn!(animals = fallback.len(), "Using fallback animal dataset");
            fallback
        }
    }
}

/// Load the catalog from a JSON file, reporting why it could not be used.
pub fn try_load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_dataset_from_str(&content)
}

/// Parse a JSON array of `{ "name", "description" }` objects.
pub fn load_dataset_from_str(json: &str) -> Result<Dataset, DatasetError> {
    let records: Vec<AnimalRecord> = serde_json::from_str(json)?;
    Dataset::new(records)
}
