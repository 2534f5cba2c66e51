//! Script down-leveling and minification with oxc.
//!
//! Pipeline per file: parse -> semantic -> transform to the target
//! ECMAScript version -> minify (compress + mangle) -> codegen with an
//! optional per-file source map.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::diagnostics::OxcDiagnostic;
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{EngineTargets, TransformOptions, Transformer};

/// Minified script and its JSON source map.
#[derive(Debug)]
pub struct JsOutput {
    pub code: String,
    pub map: Option<String>,
}

/// Transform and minify one script.
///
/// `map_source` is the path recorded in the source map's `sources`; no map is
/// produced when it is `None`.
pub fn transform(
    path: &Path,
    source: &str,
    target: &str,
    map_source: Option<PathBuf>,
) -> Result<JsOutput> {
    let allocator = Allocator::default();
    let source_type = source_type(path);

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        bail!("{}", join_errors(&ret.errors));
    }
    if ret.panicked {
        bail!("parser aborted");
    }
    let mut program = ret.program;

    let options = TransformOptions::from_target(target).map_err(|e| anyhow!("{e}"))?;
    let scoping = SemanticBuilder::new()
        .build(&program)
        .semantic
        .into_scoping();
    let ret = Transformer::new(&allocator, path, &options).build_with_scoping(scoping, &mut program);
    if !ret.errors.is_empty() {
        bail!("{}", join_errors(&ret.errors));
    }

    // The compressor must not reintroduce syntax newer than the target.
    let engine_targets = EngineTargets::from_target(target).map_err(|e| anyhow!("{e}"))?;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions {
            target: engine_targets,
            ..CompressOptions::smallest()
        }),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);

    let ret = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            source_map_path: map_source,
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program);

    Ok(JsOutput {
        code: ret.code,
        map: ret.map.map(|map| map.to_json_string()),
    })
}

/// Plain `.js` files are classic scripts; `.mjs` files are modules.
fn source_type(path: &Path) -> SourceType {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mjs") => SourceType::mjs(),
        _ => SourceType::cjs(),
    }
}

fn join_errors(errors: &[OxcDiagnostic]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
