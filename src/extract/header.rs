// src/extract/header.rs
//
// The top of an outline lays two fields per physical line ("Course <title>
// Semester <term>"), so these fields are parsed line-by-line rather than as
// blocks. Layouts differ enough that each pair degrades independently: when
// the same-line split fails, the whole remainder goes to the first field.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::schema;

static COURSE_SEMESTER: Lazy<Regex> = Lazy::new(|| pair_pattern(r"Course", r"Semester"));
static FACULTY_CONTACT: Lazy<Regex> =
    Lazy::new(|| pair_pattern(r"Faculty Name\(s\)", r"Contact"));
static SCHOOL_CREDITS: Lazy<Regex> = Lazy::new(|| pair_pattern(r"School", r"Credits"));

fn pair_pattern(first: &str, second: &str) -> Regex {
    RegexBuilder::new(&format!(r"{}\s+(.*?)\s+{}\s+(.*)", first, second))
        .case_insensitive(true)
        .build()
        .expect("header pair regex")
}

/// Index and text of the first line whose trimmed form starts with `prefix`,
/// compared case-insensitively.
fn find_line_startswith<'a>(lines: &[&'a str], prefix: &str) -> Option<(usize, &'a str)> {
    let prefix = prefix.to_lowercase();
    lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.trim().to_lowercase().starts_with(&prefix))
        .map(|(i, line)| (i, *line))
}

/// Parse the fixed two-field header lines. Returns only the fields that were
/// actually located; absent labels are simply not reported.
pub fn parse_header_fields(lines: &[&str]) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    // Course & Semester, with the wrapped-title continuation rule.
    if let Some((idx, line)) = find_line_startswith(lines, "Course") {
        if let Some(caps) = COURSE_SEMESTER.captures(line) {
            let mut course = caps[1].trim().to_string();
            out.push(("Semester", caps[2].trim().to_string()));

            // A long course title wraps onto the next physical line; append it
            // unless that line opens a competing field.
            if let Some(next) = lines.get(idx + 1) {
                let next = next.trim();
                if !next.is_empty()
                    && !schema::COURSE_CONTINUATION_STOPS
                        .iter()
                        .any(|stop| next.starts_with(stop))
                {
                    course.push(' ');
                    course.push_str(next);
                }
            }
            out.push(("Course", course));
        } else {
            out.push(("Course", line.replace("Course", "").trim().to_string()));
        }
    }

    if let Some((_, line)) = find_line_startswith(lines, "Faculty Name(s)") {
        if let Some(caps) = FACULTY_CONTACT.captures(line) {
            out.push(("Faculty Name(s)", caps[1].trim().to_string()));
            out.push(("Contact", caps[2].trim().to_string()));
        } else {
            out.push((
                "Faculty Name(s)",
                line.replace("Faculty Name(s)", "").trim().to_string(),
            ));
        }
    }

    if let Some((_, line)) = find_line_startswith(lines, "School") {
        if let Some(caps) = SCHOOL_CREDITS.captures(line) {
            out.push(("School", caps[1].trim().to_string()));
            out.push(("Credits", caps[2].trim().to_string()));
        } else {
            out.push(("School", line.replace("School", "").trim().to_string()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(text: &str) -> HashMap<&'static str, String> {
        let lines: Vec<&str> = text.split('\n').collect();
        parse_header_fields(&lines).into_iter().collect()
    }

    #[test]
    fn splits_same_line_pairs() {
        let fields = parse(
            "Course Intro to Systems Semester Fall 2024\n\
             Faculty Name(s) J. Doe Contact jdoe@x.edu\n\
             School Engineering Credits 4\n",
        );
        assert_eq!(fields["Course"], "Intro to Systems");
        assert_eq!(fields["Semester"], "Fall 2024");
        assert_eq!(fields["Faculty Name(s)"], "J. Doe");
        assert_eq!(fields["Contact"], "jdoe@x.edu");
        assert_eq!(fields["School"], "Engineering");
        assert_eq!(fields["Credits"], "4");
    }

    #[test]
    fn failed_split_assigns_first_field_only() {
        let fields = parse("Course Advanced Compilers\nFaculty Name(s) A. Grace\n");
        assert_eq!(fields["Course"], "Advanced Compilers");
        assert!(!fields.contains_key("Semester"));
        assert_eq!(fields["Faculty Name(s)"], "A. Grace");
        assert!(!fields.contains_key("Contact"));
    }

    #[test]
    fn wrapped_course_title_is_appended() {
        let fields = parse(
            "Course Distributed Systems and Semester Spring 2025\n\
             Large-Scale Computing\n\
             Faculty Name(s) B. Liskov Contact bl@x.edu\n",
        );
        assert_eq!(
            fields["Course"],
            "Distributed Systems and Large-Scale Computing"
        );
        assert_eq!(fields["Semester"], "Spring 2025");
    }

    #[test]
    fn competing_label_stops_continuation() {
        let fields = parse(
            "Course Operating Systems Semester Monsoon 2024\n\
             Faculty Name(s) C. Hoare Contact ch@x.edu\n",
        );
        assert_eq!(fields["Course"], "Operating Systems");
    }

    #[test]
    fn absent_labels_report_nothing() {
        let fields = parse("Totally unrelated text\nwith no header lines\n");
        assert!(fields.is_empty());
    }
}
