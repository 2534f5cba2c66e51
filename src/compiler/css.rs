//! Stylesheet compilation.
//!
//! Sass/SCSS sources compile through grass; plain CSS passes through. Each
//! compiled entry is parsed on its own, then the rules of all entries are
//! merged into one sheet (imports first), prefixed for the configured
//! browsers and minified by lightningcss, optionally with a source map.

use std::path::Path;

use anyhow::{Result, anyhow};
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;

use crate::config::BrowserTargets;

/// Minified stylesheet and its JSON source map.
#[derive(Debug)]
pub struct CssOutput {
    pub code: String,
    pub map: Option<String>,
}

/// A compiled stylesheet entry and the name it has in the source map.
#[derive(Debug)]
pub struct CssEntry {
    pub name: String,
    pub code: String,
}

/// Compile one source to plain CSS.
///
/// `.scss` and `.sass` go through the Sass compiler with the file's directory
/// and `load_path` as import roots; anything else is read as CSS.
pub fn compile_source(path: &Path, load_path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("scss" | "sass") => {
            let mut options = grass::Options::default().load_path(load_path);
            if let Some(dir) = path.parent() {
                options = options.load_path(dir);
            }
            grass::from_path(path, &options).map_err(|e| anyhow!("{e}"))
        }
        _ => std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read {}: {e}", path.display())),
    }
}

/// Parse an entry without keeping the result.
pub fn check(entry: &CssEntry) -> Result<()> {
    parse(entry, 0).map(drop)
}

fn parse(entry: &CssEntry, index: usize) -> Result<StyleSheet<'_>> {
    StyleSheet::parse(
        &entry.code,
        ParserOptions {
            filename: entry.name.clone(),
            source_index: u32::try_from(index)?,
            ..ParserOptions::default()
        },
    )
    .map_err(|e| anyhow!("{e}"))
}

/// Merge, prefix and minify `entries` in order.
///
/// `@import` rules of every entry are moved ahead of all other rules.
pub fn optimize(
    entries: &[CssEntry],
    targets: &BrowserTargets,
    source_map: bool,
) -> Result<CssOutput> {
    let targets = Targets::from(browsers(targets));

    let mut imports = Vec::new();
    let mut rules = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let mut sheet = parse(entry, index)?;
        for rule in std::mem::take(&mut sheet.rules.0) {
            if matches!(rule, CssRule::Import(_)) {
                imports.push(rule);
            } else {
                rules.push(rule);
            }
        }
    }
    imports.extend(rules);

    let sources = entries.iter().map(|e| e.name.clone()).collect();
    let mut stylesheet =
        StyleSheet::new(sources, CssRuleList(imports), ParserOptions::default());

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| anyhow!("{e}"))?;

    let mut map = if source_map {
        let mut map = SourceMap::new("/");
        for entry in entries {
            let index = map.add_source(&entry.name);
            map.set_source_content(index as usize, &entry.code)
                .map_err(|e| anyhow!("source map: {e:?}"))?;
        }
        Some(map)
    } else {
        None
    };

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            source_map: map.as_mut(),
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!("{e}"))?;

    let map = match map.as_mut() {
        Some(map) => Some(map.to_json(None).map_err(|e| anyhow!("source map: {e:?}"))?),
        None => None,
    };

    Ok(CssOutput {
        code: result.code,
        map,
    })
}

/// Convert major versions to lightningcss's `major << 16` encoding.
pub fn browsers(targets: &BrowserTargets) -> Browsers {
    let version = |major: Option<u32>| major.map(|v| v << 16);
    Browsers {
        chrome: version(targets.chrome),
        firefox: version(targets.firefox),
        safari: version(targets.safari),
        edge: version(targets.edge),
        ios_saf: version(targets.ios_saf),
        android: version(targets.android),
        ..Browsers::default()
    }
}
