// src/ingest/mod.rs
//
// The boundary with the PDF text/table collaborator. The engine never opens
// a PDF itself: it consumes "document dumps", one JSON file per document,
// carrying the per-page text and every table grid the upstream layout
// detector found, in document order.

use anyhow::{Context, Result};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One detected table: rows of nullable cell strings, exactly as the
/// upstream table detector yielded them.
pub type TableGrid = Vec<Vec<Option<String>>>;

/// Everything the collaborator supplies for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDump {
    /// Name of the originating document (e.g. "CS101.pdf").
    pub source_file: String,
    /// Per-page extracted text, in page order.
    #[serde(default)]
    pub pages: Vec<String>,
    /// Table grids across all pages, in document order.
    #[serde(default)]
    pub tables: Vec<TableGrid>,
}

impl DocumentDump {
    /// Join the page texts into the single linearized string the field
    /// extractors scan. Each page contributes a trailing newline so a label
    /// opening the next page still sits at a line start.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(page);
            text.push('\n');
        }
        text
    }
}

/// Load one dump file. Missing or malformed files fail with context; the
/// pipeline treats that as "skip this document".
pub fn load_dump(path: &Path) -> Result<DocumentDump> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading document dump {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing document dump {}", path.display()))
}

/// All dump files under `dir`, sorted by path for a stable processing order.
pub fn discover_dumps(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*.json", dir.display());
    let mut paths = Vec::new();
    for entry in glob(&pattern).context("invalid glob pattern for dump discovery")? {
        paths.push(entry?);
    }
    paths.sort();
    Ok(paths)
}
