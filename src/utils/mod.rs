//! Shared utilities: globbing, paths, dates, sizes, MIME types.

pub mod date;
pub mod glob;
pub mod mime;
pub mod path;
pub mod plural;
pub mod size;

pub use plural::plural_count;
