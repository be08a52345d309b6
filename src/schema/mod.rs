// src/schema/mod.rs
//
// The fixed field vocabulary for course-outline extraction: metadata field
// names, the label synonyms tried for each block field, the boundary labels
// that terminate a block, and the semantic roles of session-table columns.
// All of it is static configuration handed to the extractors, so tests can
// substitute synthetic plans.

/// Every metadata field a record declares. Extraction always produces a value
/// for each of these (empty string when the label was never found).
pub static METADATA_FIELDS: &[&str] = &[
    "Course",
    "Semester",
    "Faculty Name(s)",
    "Contact",
    "School",
    "Credits",
    "Pedagogy",
    "Teaching Pedagogy Enable/NP",
    "Schedule",
    "Prerequisite",
    "Antirequisite",
    "Corequisite",
    "GER Category",
    "Course Description",
    "Course Objectives",
    "Learning Outcomes",
    "Assessment/Evaluation",
    "Attendance Policy",
    "Project / Assignment Details",
    "Course Material",
    "Additional Information",
];

/// Every label that can terminate a block capture when it appears at the
/// start of a line. Any later field's label ends any earlier field's text,
/// so this is the union of all markers seen across outline layouts.
pub static BOUNDARY_LABELS: &[&str] = &[
    "Course",
    "Semester",
    "Faculty Name(s)",
    "Contact",
    "School",
    "Credits",
    "GER Category",
    "Teaching Pedagogy Enable",
    "P/NP Course",
    "Schedule",
    "Prerequisite",
    "Antirequisite",
    "Corequisite",
    "Course Description",
    "Course Objectives",
    "Learning Outcomes",
    "Assessment/Evaluation",
    "Attendance Policy",
    "Project / Assignment Details",
    "Course Material",
    "Additional Information",
    "Session Plan",
    // Extra terminators observed in text dumps of real outlines.
    "Pedagogy",
    "Expectation From Students",
    "Project / Assignment",
    "Details",
];

/// One block field and the marker labels tried for it, in priority order.
/// The first label that yields a non-empty block wins.
#[derive(Debug)]
pub struct FieldPlan {
    pub field: &'static str,
    pub labels: &'static [&'static str],
}

/// The block fields, in the order they are resolved. The synonym order is
/// load-bearing: reordering it silently changes extraction results.
pub static BLOCK_FIELD_PLAN: &[FieldPlan] = &[
    FieldPlan {
        field: "GER Category",
        labels: &["GER Category"],
    },
    FieldPlan {
        field: "Teaching Pedagogy Enable/NP",
        labels: &["Teaching Pedagogy Enable", "P/NP Course"],
    },
    FieldPlan {
        field: "Schedule",
        labels: &["Schedule"],
    },
    FieldPlan {
        field: "Prerequisite",
        labels: &["Prerequisite"],
    },
    FieldPlan {
        field: "Antirequisite",
        labels: &["Antirequisite"],
    },
    FieldPlan {
        field: "Corequisite",
        labels: &["Corequisite"],
    },
    FieldPlan {
        field: "Course Description",
        labels: &["Course Description"],
    },
    FieldPlan {
        field: "Course Objectives",
        labels: &["Course Objectives"],
    },
    FieldPlan {
        field: "Learning Outcomes",
        labels: &["Learning Outcomes"],
    },
    FieldPlan {
        field: "Assessment/Evaluation",
        labels: &["Assessment/Evaluation", "Assessment", "Evaluation"],
    },
    FieldPlan {
        field: "Attendance Policy",
        labels: &["Attendance Policy"],
    },
    FieldPlan {
        field: "Project / Assignment Details",
        labels: &[
            "Project / Assignment Details",
            "Project / Assignment",
            "Project Details",
            "Assignment Details",
        ],
    },
    FieldPlan {
        field: "Course Material",
        labels: &["Course Material"],
    },
    FieldPlan {
        field: "Additional Information",
        labels: &["Additional Information"],
    },
];

/// A nested section inside the "Course Material" block. Unlike top-level
/// blocks, a section also terminates at the end of the material text, and its
/// stop labels are deliberately loose prefixes ("Reference Book" catches both
/// the singular and plural spellings).
#[derive(Debug)]
pub struct MaterialSection {
    pub name: &'static str,
    pub labels: &'static [&'static str],
    pub stops: &'static [&'static str],
}

/// Sections of "Course Material", emitted in this order.
pub static MATERIAL_SECTIONS: &[MaterialSection] = &[
    MaterialSection {
        name: "Text Book(s)",
        labels: &["Text Book(s)", "Text Book"],
        stops: &["Reference Book", "Other Course Material"],
    },
    MaterialSection {
        name: "Reference Book(s)",
        labels: &["Reference Book(s)", "Reference Book"],
        stops: &["Text Book", "Other Course Material"],
    },
    MaterialSection {
        name: "Other Course Material",
        labels: &["Other Course Material"],
        stops: &["Text Book", "Reference Book"],
    },
];

/// Labels that, when they start the line after the Course header line, mean
/// that line is a new field rather than a wrapped continuation of the course
/// title. Matched case-sensitively against the raw line.
pub static COURSE_CONTINUATION_STOPS: &[&str] = &[
    "Faculty", "School", "Contact", "Credits", "GER", "Pedagogy", "Schedule",
];

/// Semantic role of a session-plan table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    TopicTitle,
    SubtopicDetails,
    Readings,
    Activities,
    ImportantDates,
}

impl ColumnRole {
    /// The label used when assembling a session's detail string.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::TopicTitle => "TOPIC TITLE",
            ColumnRole::SubtopicDetails => "TOPIC & SUBTOPIC DETAILS",
            ColumnRole::Readings => "READINGS, CASES, ETC.",
            ColumnRole::Activities => "ACTIVITIES",
            ColumnRole::ImportantDates => "IMPORTANT DATES",
        }
    }

    /// Classify a header cell (already lower-cased, newlines folded to
    /// spaces) by substring. First matching rule wins; unmatched columns are
    /// left out of the role map entirely.
    pub fn from_header_cell(cell: &str) -> Option<ColumnRole> {
        if cell.contains("topic") && cell.contains("title") {
            Some(ColumnRole::TopicTitle)
        } else if cell.contains("subtopic") {
            Some(ColumnRole::SubtopicDetails)
        } else if cell.contains("reading") {
            Some(ColumnRole::Readings)
        } else if cell.contains("activit") {
            Some(ColumnRole::Activities)
        } else if cell.contains("date") {
            Some(ColumnRole::ImportantDates)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_block_field_is_a_metadata_field() {
        for plan in BLOCK_FIELD_PLAN {
            assert!(
                METADATA_FIELDS.contains(&plan.field),
                "{} missing from METADATA_FIELDS",
                plan.field
            );
        }
    }

    #[test]
    fn every_primary_block_label_is_a_boundary_label() {
        // A field's primary marker must also act as a terminator for earlier
        // fields, otherwise blocks would swallow their successors. Fallback
        // synonyms (bare "Assessment", "Project Details", ...) are deliberately
        // not terminators: they are too short to anchor a boundary safely.
        for plan in BLOCK_FIELD_PLAN {
            let primary = plan.labels[0];
            assert!(
                BOUNDARY_LABELS.contains(&primary),
                "{} missing from BOUNDARY_LABELS",
                primary
            );
        }
    }

    #[test]
    fn header_cell_classification() {
        assert_eq!(
            ColumnRole::from_header_cell("topic title"),
            Some(ColumnRole::TopicTitle)
        );
        // Contains "topic" but not "title", so the subtopic rule catches it.
        assert_eq!(
            ColumnRole::from_header_cell("topic & subtopic details"),
            Some(ColumnRole::SubtopicDetails)
        );
        assert_eq!(
            ColumnRole::from_header_cell("readings, cases, etc."),
            Some(ColumnRole::Readings)
        );
        assert_eq!(
            ColumnRole::from_header_cell("activities"),
            Some(ColumnRole::Activities)
        );
        assert_eq!(
            ColumnRole::from_header_cell("important dates"),
            Some(ColumnRole::ImportantDates)
        );
        assert_eq!(ColumnRole::from_header_cell("session no."), None);
    }
}
