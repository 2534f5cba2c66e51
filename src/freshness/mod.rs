//! Freshness detection for incremental tasks.
//!
//! Only the images task is incremental: an output is rewritten when its
//! source has a newer modification time, or when the output is missing.

pub mod mtime;

pub use mtime::is_stale;
