//! Index source maps for concatenated bundles.
//!
//! Each concatenated chunk keeps its own map; the index map places them at
//! the line where the chunk starts in the bundle.
//!
//! ```json
//! {"version":3,"file":"main.min.js","sections":[
//!   {"offset":{"line":0,"column":0},"map":{...}},
//!   {"offset":{"line":1,"column":0},"map":{...}}
//! ]}
//! ```

use anyhow::{Context, Result};
use serde_json::{Value, json};

/// Builder for a bundle's code and index source map.
#[derive(Debug)]
pub struct Bundle {
    file: String,
    code: String,
    line: u32,
    chunks: usize,
    sections: Vec<Value>,
}

impl Bundle {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            code: String::new(),
            line: 0,
            chunks: 0,
            sections: Vec::new(),
        }
    }

    /// Append a chunk on a new line, with its JSON source map if any.
    ///
    /// Every chunk after the first starts a line, even when earlier ones are empty.
    pub fn push(&mut self, code: &str, map: Option<&str>) -> Result<()> {
        if self.chunks > 0 {
            self.code.push('\n');
            self.line += 1;
        }

        if let Some(map) = map {
            let map: Value = serde_json::from_str(map).context("invalid chunk source map")?;
            self.sections.push(json!({
                "offset": { "line": self.line, "column": 0 },
                "map": map,
            }));
        }

        self.code.push_str(code);
        self.chunks += 1;
        #[allow(clippy::cast_possible_truncation)]
        {
            self.line += code.matches('\n').count() as u32;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.chunks == 0
    }

    /// Bundle code and serialized index map.
    pub fn finish(self) -> (String, String) {
        let map = json!({
            "version": 3,
            "file": self.file,
            "sections": self.sections,
        });
        (self.code, map.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"{"version":3,"sources":["a.js"],"names":[],"mappings":"AAAA"}"#;

    #[test]
    fn test_empty_chunk_keeps_its_line() {
        let mut bundle = Bundle::new("main.min.js");
        assert!(bundle.is_empty());
        bundle.push("", Some(MAP)).unwrap();
        bundle.push("b()", Some(MAP)).unwrap();
        assert!(!bundle.is_empty());

        let (code, map) = bundle.finish();
        assert_eq!(code, "\nb()");
        let map: Value = serde_json::from_str(&map).unwrap();
        assert_eq!(map["sections"][0]["offset"]["line"], 0);
        assert_eq!(map["sections"][1]["offset"]["line"], 1);
    }

    #[test]
    fn test_offsets_follow_lines() {
        let mut bundle = Bundle::new("main.min.js");
        bundle.push("var a=1;", Some(MAP)).unwrap();
        bundle.push("var b=2;\nvar c=3;", Some(MAP)).unwrap();
        bundle.push("var d=4;", Some(MAP)).unwrap();

        let (code, map) = bundle.finish();
        assert_eq!(code, "var a=1;\nvar b=2;\nvar c=3;\nvar d=4;");

        let map: Value = serde_json::from_str(&map).unwrap();
        assert_eq!(map["file"], "main.min.js");
        let lines: Vec<_> = map["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["offset"]["line"].as_u64().unwrap())
            .collect();
        assert_eq!(lines, vec![0, 1, 3]);
    }

    #[test]
    fn test_chunk_without_map() {
        let mut bundle = Bundle::new("main.min.js");
        bundle.push("a()", None).unwrap();
        bundle.push("b()", Some(MAP)).unwrap();
        let (_, map) = bundle.finish();
        let map: Value = serde_json::from_str(&map).unwrap();
        assert_eq!(map["sections"][0]["offset"]["line"], 1);
        assert_eq!(map["sections"][0]["map"]["sources"][0], "a.js");
    }

    #[test]
    fn test_invalid_chunk_map() {
        let mut bundle = Bundle::new("x.js");
        assert!(bundle.push("a()", Some("not json")).is_err());
    }
}
