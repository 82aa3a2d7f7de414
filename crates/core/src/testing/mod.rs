//! Testing utilities and mock implementations.
//!
//! Mocks for the injectable seams (tie-breaks, the payment gate, the client's
//! payment handler) plus small dataset fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use spirit_core::testing::{fixtures, FixedTieBreaker};
//!
//! let matcher = Matcher::new(Arc::new(FixedTieBreaker::new(0)));
//! let result = matcher.find_match("act", &fixtures::records(&["Cat", "Tac"]))?;
//! assert_eq!(result.selected.name, "Cat");
//! ```

mod mock_payment_gate;
mod mock_payment_handler;

pub use mock_payment_gate::MockPaymentGate;
pub use mock_payment_handler::MockPaymentHandler;

use crate::matcher::TieBreaker;

/// Tie breaker that always picks the same index.
#[derive(Debug, Clone, Copy)]
pub struct FixedTieBreaker {
    index: usize,
}

impl FixedTieBreaker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl TieBreaker for FixedTieBreaker {
    fn pick(&self, _tie_count: usize) -> usize {
        self.index
    }
}

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::dataset::{AnimalRecord, Dataset};

    /// An animal with a generated description.
    pub fn animal(name: &str) -> AnimalRecord {
        AnimalRecord::new(name, format!("The {} spirit", name.to_lowercase()))
    }

    /// Records for each name, in order.
    pub fn records(names: &[&str]) -> Vec<AnimalRecord> {
        names.iter().map(|name| animal(name)).collect()
    }

    /// A dataset for each name, in order. Panics on an empty list.
    pub fn dataset(names: &[&str]) -> Dataset {
        Dataset::new(records(names)).expect("fixture dataset must not be empty")
    }
}
