//! Path utilities.

pub mod fs;

pub use fs::{normalize_path, relative_to, to_slash};
