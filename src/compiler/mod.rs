//! Thin wrappers around the transformer crates.
//!
//! Each module drives one library with fixed options and returns bytes or
//! strings; reading sources and writing outputs is left to the tasks.
//!
//! | Module      | Library                          |
//! |-------------|----------------------------------|
//! | `template`  | tera                             |
//! | `html`      | minify-html                      |
//! | `css`       | grass, lightningcss              |
//! | `js`        | oxc                              |
//! | `sourcemap` | index source maps (serde_json)   |
//! | `image`     | image                            |

pub mod css;
pub mod html;
pub mod image;
pub mod js;
pub mod sourcemap;
pub mod template;
