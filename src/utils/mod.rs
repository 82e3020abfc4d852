//! Shared helpers.

pub mod paths;

pub use paths::{normalize_path, path_equal};
