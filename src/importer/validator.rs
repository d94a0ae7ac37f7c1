// ==========================================
// Exam Import Pipeline - Record Validator
// ==========================================
// Stage 4: business rules over candidate records.
// Rules attach to their record with row context; none
// is fatal to the batch on its own. Only the severity
// split decides overall success downstream.
// ==========================================

use crate::domain::exam::ExamRecord;
use crate::domain::report::Finding;
use crate::domain::types::FindingKind;

/// Minimum sensible exam duration; anything shorter is almost
/// always a unit mistake (hours vs minutes).
pub const MIN_DURATION_MINUTES: u32 = 5;

/// Validate one exam record.
///
/// # Rules
/// - empty title -> error (`title`)
/// - empty subject -> warning (`subject`, with suggestion)
/// - duration under 5 minutes -> warning (`duration_minutes`, with suggestion)
pub fn validate_exam(exam: &ExamRecord, row: Option<usize>) -> Vec<Finding> {
    let mut findings = Vec::new();

    if exam.title.trim().is_empty() {
        findings.push(attach_row(
            Finding::error(FindingKind::Validation, "exam title is required").with_field("title"),
            row,
        ));
    }

    if exam.subject.trim().is_empty() {
        findings.push(attach_row(
            Finding::warning(FindingKind::Validation, "exam subject is empty")
                .with_field("subject")
                .with_suggestion("fill in the subject column or set default_subject"),
            row,
        ));
    }

    if exam.duration_minutes < MIN_DURATION_MINUTES {
        findings.push(attach_row(
            Finding::warning(
                FindingKind::Validation,
                format!(
                    "exam duration {} minutes is shorter than {} minutes",
                    exam.duration_minutes, MIN_DURATION_MINUTES
                ),
            )
            .with_field("duration_minutes")
            .with_suggestion("check the duration column for an hours/minutes mix-up"),
            row,
        ));
    }

    findings
}

fn attach_row(finding: Finding, row: Option<usize>) -> Finding {
    match row {
        Some(row) => finding.with_row(row),
        None => finding,
    }
}
