//! Generated site metadata files.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`) from the output tree
//! - **Robots**: crawler policy (`robots.txt`)
//!
//! Generators only build document text; the `sitemap` and `robots` tasks
//! decide what to scan and where to write.

pub mod robots;
pub mod sitemap;
