// src/extract/block.rs
//
// Marker-based block capture: the text of a field is whatever sits between
// its label and the nearest following label that starts a line. Anchoring the
// terminator to a line start is the load-bearing rule here; a label word that
// happens to appear mid-sentence inside the field body must never cut the
// capture short.

use anyhow::{Context, Result};
use regex::RegexBuilder;

use super::normalize::normalize;

/// Extract the block that starts at `start_label` and runs to the nearest
/// `end_labels` entry found at the start of a later line (newline plus
/// optional indentation). The label may be followed by a `:` or `-`
/// separator. Returns the normalized capture, or "" when the start label is
/// absent or no qualifying terminator follows it.
pub fn extract_block(full_text: &str, start_label: &str, end_labels: &[&str]) -> Result<String> {
    if end_labels.is_empty() {
        return Ok(String::new());
    }
    let ends = end_labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"{}\s*[:\-]?\s*(.*?)\s*\n\s*(?:{})",
        regex::escape(start_label),
        ends
    );
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .with_context(|| format!("building block pattern for label {:?}", start_label))?;

    Ok(re
        .captures(full_text)
        .and_then(|c| c.get(1))
        .map(|m| normalize(m.as_str()))
        .unwrap_or_default())
}

/// Extract a nested section from an already-normalized block. Looser than
/// `extract_block`: stop labels match anywhere (the block is one line after
/// normalization) and end-of-text also terminates. Returns the trimmed
/// capture, or "" when the section label is absent.
pub fn extract_section(text: &str, start_label: &str, stop_labels: &[&str]) -> Result<String> {
    let stops = stop_labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"{}\s*[:\-]?\s*(.*?)\s*(?:{}|$)",
        regex::escape(start_label),
        stops
    );
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .with_context(|| format!("building section pattern for label {:?}", start_label))?;

    Ok(re
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_up_to_next_line_start_label() -> Result<()> {
        let text = "Course Description: Builds systems.\nLearning Outcomes: Students build things.\nSession Plan\n";
        assert_eq!(
            extract_block(text, "Course Description", &["Learning Outcomes", "Session Plan"])?,
            "Builds systems."
        );
        assert_eq!(
            extract_block(text, "Learning Outcomes", &["Session Plan"])?,
            "Students build things."
        );
        Ok(())
    }

    #[test]
    fn mid_line_label_does_not_truncate() -> Result<()> {
        // "Learning Outcomes" appears mid-sentence inside the description; the
        // real boundary is the occurrence at the start of the next line.
        let text = "Course Description: We discuss Learning Outcomes here at length.\nLearning Outcomes: B.\nSession Plan\n";
        assert_eq!(
            extract_block(text, "Course Description", &["Learning Outcomes", "Session Plan"])?,
            "We discuss Learning Outcomes here at length."
        );
        Ok(())
    }

    #[test]
    fn capture_spans_newlines() -> Result<()> {
        let text = "Course Objectives: First.\nSecond.\nThird.\nAttendance Policy: strict\nSession Plan\n";
        assert_eq!(
            extract_block(text, "Course Objectives", &["Attendance Policy", "Session Plan"])?,
            "First. Second. Third."
        );
        Ok(())
    }

    #[test]
    fn terminator_may_be_indented() -> Result<()> {
        let text = "Schedule: Mon 9am\n   Prerequisite: none\n";
        assert_eq!(
            extract_block(text, "Schedule", &["Prerequisite"])?,
            "Mon 9am"
        );
        Ok(())
    }

    #[test]
    fn absent_label_yields_empty() -> Result<()> {
        let text = "Course Description: A.\nLearning Outcomes: B.\n";
        assert_eq!(
            extract_block(text, "Nonexistent Label", &["Learning Outcomes"])?,
            ""
        );
        Ok(())
    }

    #[test]
    fn unterminated_block_yields_empty() -> Result<()> {
        // No boundary label follows, so there is nothing safe to capture.
        let text = "Course Description: trailing text with no further labels";
        assert_eq!(
            extract_block(text, "Course Description", &["Learning Outcomes"])?,
            ""
        );
        Ok(())
    }

    #[test]
    fn matching_is_case_insensitive() -> Result<()> {
        let text = "COURSE DESCRIPTION - shouty text\nlearning outcomes: b\n";
        assert_eq!(
            extract_block(text, "Course Description", &["Learning Outcomes"])?,
            "shouty text"
        );
        Ok(())
    }

    #[test]
    fn section_terminates_at_stop_or_end() -> Result<()> {
        let text = "Text Book(s): Kernighan & Ritchie Reference Book(s): Stevens";
        assert_eq!(
            extract_section(text, "Text Book(s)", &["Reference Book", "Other Course Material"])?,
            "Kernighan & Ritchie"
        );
        assert_eq!(
            extract_section(text, "Reference Book(s)", &["Text Book", "Other Course Material"])?,
            "Stevens"
        );
        Ok(())
    }
}
