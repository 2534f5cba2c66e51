//! Configuration section definitions.
//!
//! Each module corresponds to one or more sections in `sitepipe.toml`:
//!
//! | Module   | TOML Section                        | Purpose                       |
//! |----------|-------------------------------------|-------------------------------|
//! | `paths`  | `[paths.<category>]`                | Source globs and destinations |
//! | `site`   | `[build]`, `[site]`, `[clean]`      | Output dir, origin, cleaning  |
//! | `assets` | `[styles]`, `[scripts]`, `[images]` | Transformer options           |
//! | `serve`  | `[serve]`, `[watch]`                | Preview server and watcher    |

mod assets;
mod paths;
mod serve;
mod site;

pub use assets::{BrowserTargets, ImagesConfig, ScriptsConfig, StylesConfig};
pub use paths::{CategoryPaths, PathsConfig};
pub use serve::{ServeConfig, WatchConfig};
pub use site::{BuildConfig, CleanConfig, SiteConfig};
