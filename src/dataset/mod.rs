// src/dataset/mod.rs
//
// The accumulated dataset: a master JSON store of flattened records plus a
// Parquet export. The tabular column set is the union of the fixed metadata
// columns and every "Session <n>" column seen across all records, recomputed
// on every merge so a later outline with more sessions widens earlier rows
// instead of being truncated to the first document's count.

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use chrono::Utc;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::extract::ExtractedRecord;
use crate::schema;

pub const SOURCE_FILE_COL: &str = "Source File";
pub const EXTRACTED_AT_COL: &str = "Extracted At";

/// Column name for session `n`.
pub fn session_column(n: u32) -> String {
    format!("Session {}", n)
}

/// Inverse of `session_column`: Some(n) for a well-formed "Session <n>".
fn parse_session_column(name: &str) -> Option<u32> {
    name.strip_prefix("Session ")?.parse().ok()
}

/// One flattened record as stored in the master file: plain string cells
/// keyed by column name, plus the session high-water mark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    #[serde(rename = "Max_Session")]
    pub max_session: u32,
    #[serde(flatten)]
    pub cells: BTreeMap<String, String>,
}

impl Row {
    /// Flatten an extracted record, stamping provenance columns.
    pub fn from_record(record: &ExtractedRecord, source_file: &str) -> Row {
        let mut cells = record.fields.clone();
        cells.insert(SOURCE_FILE_COL.to_string(), source_file.to_string());
        cells.insert(EXTRACTED_AT_COL.to_string(), Utc::now().to_rfc3339());
        for (number, details) in &record.sessions {
            cells.insert(session_column(*number), details.clone());
        }
        Row {
            max_session: record.max_session(),
            cells,
        }
    }

    /// The highest session this row claims, trusting actual columns over the
    /// recorded high-water mark in case the store predates it.
    fn effective_max_session(&self) -> u32 {
        let from_cols = self
            .cells
            .keys()
            .filter_map(|c| parse_session_column(c))
            .max()
            .unwrap_or(0);
        self.max_session.max(from_cols)
    }
}

/// The master store: every record ever extracted, reloaded and appended on
/// each run.
pub struct Store {
    path: PathBuf,
    rows: Vec<Row>,
}

impl Store {
    /// Open the store at `path`. A missing file starts an empty dataset; an
    /// unreadable one is logged and treated as empty rather than aborting
    /// the run.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self { path, rows: Vec::new() });
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading master store {}", path.display()))?;
        let rows = match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(path = %path.display(), %err, "master store unreadable, starting empty");
                Vec::new()
            }
        };
        Ok(Self { path, rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Source-file names already present, used to skip reprocessing.
    pub fn known_sources(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(SOURCE_FILE_COL).cloned())
            .collect()
    }

    pub fn append(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    /// Persist the store. Writes to a temporary sibling and renames so a
    /// failure mid-write cannot clobber the previous master file.
    pub fn save(&self) -> Result<()> {
        let body = serde_json::to_string_pretty(&self.rows).context("serializing master store")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)
            .with_context(|| format!("writing master store {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing master store {}", self.path.display()))?;
        Ok(())
    }

    /// The export column set: fixed metadata columns, provenance, then
    /// "Session 1..=N" for the global session maximum across every row.
    pub fn columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = schema::METADATA_FIELDS
            .iter()
            .map(|f| f.to_string())
            .collect();
        cols.push(SOURCE_FILE_COL.to_string());
        cols.push(EXTRACTED_AT_COL.to_string());

        let global_max = self
            .rows
            .iter()
            .map(Row::effective_max_session)
            .max()
            .unwrap_or(0);
        for n in 1..=global_max {
            cols.push(session_column(n));
        }
        cols
    }

    /// Export the whole dataset to one Parquet file. Every column is Utf8;
    /// cells a row never produced export as "". Max_Session is a bookkeeping
    /// field and is not exported.
    #[instrument(level = "info", skip(self, out_path), fields(path = %out_path.as_ref().display()))]
    pub fn export_parquet<P: AsRef<Path>>(&self, out_path: P) -> Result<()> {
        let columns = self.columns();

        let fields: Vec<Field> = columns
            .iter()
            .map(|c| Field::new(c, DataType::Utf8, true))
            .collect();
        let arrow_schema = Arc::new(ArrowSchema::new(fields));

        let arrays: Vec<ArrayRef> = columns
            .iter()
            .map(|col| {
                let values: Vec<String> = self
                    .rows
                    .iter()
                    .map(|row| row.cells.get(col).cloned().unwrap_or_default())
                    .collect();
                Arc::new(StringArray::from(values)) as ArrayRef
            })
            .collect();

        let batch = RecordBatch::try_new(arrow_schema.clone(), arrays)
            .context("building dataset record batch")?;

        let file = File::create(out_path.as_ref())
            .with_context(|| format!("creating export file {}", out_path.as_ref().display()))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, arrow_schema, Some(props))
            .context("creating Arrow writer for export")?;
        writer.write(&batch).context("writing dataset batch")?;
        writer.close().context("closing dataset writer")?;

        info!(rows = self.rows.len(), columns = columns.len(), "exported dataset");
        Ok(())
    }
}
