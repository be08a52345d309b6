// src/extract/fields.rs
//
// Drives the block extractor across the declared field plan. Each field is an
// ordered chain of candidate labels; the chain is walked until one yields a
// non-empty block. The plan and boundary set are parameters rather than
// globals so the resolver can be exercised against synthetic schemas.

use anyhow::Result;
use tracing::trace;

use super::block::{extract_block, extract_section};
use crate::schema::{FieldPlan, MaterialSection};

/// Resolve every block field against `full_text`. Produces one entry per plan
/// field, empty when no candidate label matched.
pub fn resolve_fields(
    full_text: &str,
    plan: &[FieldPlan],
    boundary_labels: &[&str],
) -> Result<Vec<(&'static str, String)>> {
    let mut out = Vec::with_capacity(plan.len());
    for entry in plan {
        let mut value = String::new();
        for &label in entry.labels {
            value = extract_block(full_text, label, boundary_labels)?;
            if !value.is_empty() {
                trace!(field = entry.field, label, "resolved via label");
                break;
            }
        }
        out.push((entry.field, value));
    }
    Ok(out)
}

/// Re-segment a raw "Course Material" block into its nested sections and
/// render them as "<Section>:\n<content>" paragraphs in declared order. Falls
/// back to the raw block when no section label is present.
pub fn format_course_material(raw: &str, sections: &[MaterialSection]) -> Result<String> {
    let mut formatted = String::new();
    for section in sections {
        let mut body = String::new();
        for &label in section.labels {
            body = extract_section(raw, label, section.stops)?;
            if !body.is_empty() {
                break;
            }
        }
        if !body.is_empty() {
            formatted.push_str(section.name);
            formatted.push_str(":\n");
            formatted.push_str(&body);
            formatted.push_str("\n\n");
        }
    }
    if formatted.is_empty() {
        Ok(raw.to_string())
    } else {
        Ok(formatted.trim().to_string())
    }
}
