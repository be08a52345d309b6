// src/extract/mod.rs

pub mod block;
pub mod fields;
pub mod header;
pub mod normalize;
pub mod sessions;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::instrument;

use crate::ingest::DocumentDump;
use crate::schema;
use sessions::SessionMap;

/// One extracted record per document: every declared metadata field (empty
/// when unresolved) plus the reconstructed session schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub fields: BTreeMap<String, String>,
    pub sessions: SessionMap,
}

impl ExtractedRecord {
    /// Highest session number found, 0 when the outline had no usable
    /// session table.
    pub fn max_session(&self) -> u32 {
        sessions::max_session(&self.sessions)
    }
}

/// Run the full extraction pipeline over one document dump: header lines and
/// block fields against the linearized text, session reconstruction against
/// the table grids. Field-level misses resolve to empty values; only a
/// malformed label plan can fail, and a failure here means the document
/// yields no record at all (never a partial one).
#[instrument(level = "info", skip(dump), fields(source = %dump.source_file))]
pub fn extract_record(dump: &DocumentDump) -> Result<ExtractedRecord> {
    let full_text = dump.full_text();
    let lines: Vec<&str> = full_text.split('\n').collect();

    let mut fields: BTreeMap<String, String> = schema::METADATA_FIELDS
        .iter()
        .map(|f| (f.to_string(), String::new()))
        .collect();

    for (field, value) in header::parse_header_fields(&lines) {
        fields.insert(field.to_string(), value);
    }

    let resolved = fields::resolve_fields(&full_text, schema::BLOCK_FIELD_PLAN, schema::BOUNDARY_LABELS)
        .context("resolving block fields")?;
    for (field, value) in resolved {
        if value.is_empty() {
            continue;
        }
        let value = if field == "Course Material" {
            fields::format_course_material(&value, schema::MATERIAL_SECTIONS)
                .context("formatting course material")?
        } else {
            value
        };
        fields.insert(field.to_string(), value);
    }

    let sessions = sessions::reconstruct_sessions(&dump.tables);

    Ok(ExtractedRecord { fields, sessions })
}
