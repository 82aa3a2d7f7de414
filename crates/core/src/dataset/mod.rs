//! Animal dataset store.
//!
//! The catalog is loaded once at startup into an immutable, shared
//! [`Dataset`]. Load failures never surface to callers: the loader logs the
//! cause and substitutes a small built-in catalog.

mod loader;
mod types;

pub use loader::{load_dataset, load_dataset_from_str, try_load_dataset};
pub use types::*;
