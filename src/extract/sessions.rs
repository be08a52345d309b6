// src/extract/sessions.rs
//
// Rebuilds the session-plan table from per-page table fragments. Column
// layouts drift between outlines (and sometimes between pages of the same
// outline), so the scan is an explicit state machine: nothing is collected
// until a header row is sighted, and every new header sighting rebuilds the
// column-role map from scratch. Merging maps across headers would let a
// stray header-like row corrupt the mapping for every row after it.

use std::collections::BTreeMap;

use tracing::debug;

use super::normalize::normalize;
use crate::ingest::TableGrid;
use crate::schema::ColumnRole;

/// Session number → assembled detail string.
pub type SessionMap = BTreeMap<u32, String>;

#[derive(Debug, PartialEq, Eq)]
enum ScanState {
    AwaitingHeader,
    Collecting,
}

/// Lower-case a header cell and fold embedded newlines, the form the
/// signature and role rules match against.
fn fold_header_cell(cell: &str) -> String {
    cell.to_lowercase().replace('\n', " ")
}

/// A table opens a new session-plan segment iff its first row reads like the
/// plan's column-title row.
fn is_header_row(row: &[Option<String>]) -> bool {
    let joined = row
        .iter()
        .filter_map(|c| c.as_deref())
        .filter(|c| !c.is_empty())
        .map(fold_header_cell)
        .collect::<Vec<_>>()
        .join(" ");
    joined.contains("topic") && (joined.contains("reading") || joined.contains("activity"))
}

/// Column index → role, rebuilt from a header row. First matching rule per
/// column wins; columns that match nothing stay unmapped.
fn build_role_map(header: &[Option<String>]) -> BTreeMap<usize, ColumnRole> {
    let mut roles = BTreeMap::new();
    for (idx, cell) in header.iter().enumerate() {
        let Some(cell) = cell.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        if let Some(role) = ColumnRole::from_header_cell(&fold_header_cell(cell)) {
            roles.insert(idx, role);
        }
    }
    roles
}

/// Parse a first cell as a session number, tolerating the trailing ".0" that
/// numeric cell extraction leaves behind.
fn parse_session_number(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    let cell = cell.strip_suffix(".0").unwrap_or(cell);
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell.parse().ok()
}

/// Assemble one session's detail string from its row: "<role>: <value>" for
/// every mapped, non-empty, non-placeholder cell, in column order. Returns
/// None when no mapped cell carries anything usable.
fn build_details(row: &[Option<String>], roles: &BTreeMap<usize, ColumnRole>) -> Option<String> {
    let mut details = Vec::new();
    for (idx, cell) in row.iter().enumerate() {
        if idx == 0 {
            // Column 0 is the session number itself.
            continue;
        }
        let Some(role) = roles.get(&idx) else {
            continue;
        };
        let value = normalize_cell(cell.as_deref());
        if value.is_empty() {
            continue;
        }
        details.push(format!("{}: {}", role.label(), value));
    }
    if details.is_empty() {
        None
    } else {
        Some(details.join("\n"))
    }
}

/// Normalize a cell, mapping the "nan"/"n/a" placeholders to empty.
fn normalize_cell(cell: Option<&str>) -> String {
    let value = match cell {
        Some(c) => normalize(c),
        None => return String::new(),
    };
    let lower = value.to_lowercase();
    if lower == "nan" || lower == "n/a" {
        String::new()
    } else {
        value
    }
}

/// Fold every table grid, in document order, into one session-indexed map.
/// A session number that repeats overwrites the earlier row (last seen wins).
pub fn reconstruct_sessions(tables: &[TableGrid]) -> SessionMap {
    let mut sessions = SessionMap::new();
    let mut roles: BTreeMap<usize, ColumnRole> = BTreeMap::new();
    let mut state = ScanState::AwaitingHeader;

    for table in tables {
        let Some(first_row) = table.first() else {
            continue;
        };

        let mut start_row = 0;
        if is_header_row(first_row) {
            state = ScanState::Collecting;
            roles = build_role_map(first_row);
            debug!(columns = roles.len(), "rebuilt column role map");
            start_row = 1;
        }

        if state == ScanState::AwaitingHeader {
            // Tables before the first header are unrelated (grading rubrics,
            // contact tables, ...) and are skipped wholesale.
            continue;
        }

        for row in &table[start_row..] {
            let Some(number) = row
                .first()
                .and_then(|c| c.as_deref())
                .and_then(parse_session_number)
            else {
                continue;
            };
            if let Some(details) = build_details(row, &roles) {
                sessions.insert(number, details);
            }
        }
    }

    sessions
}

/// The highest session number found, 0 when no session row qualified.
pub fn max_session(sessions: &SessionMap) -> u32 {
    sessions.keys().next_back().copied().unwrap_or(0)
}
