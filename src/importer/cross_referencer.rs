// ==========================================
// Exam Import Pipeline - Cross Referencer
// ==========================================
// Stage 3: attach question candidates to their parent
// exams. Question rows carry no structural exam id,
// only a plain-text exam title, so the join is exact,
// case-sensitive string equality on the title. Two
// exams sharing a title silently merge their questions
// under the first match; the file format offers nothing
// stronger to correlate on.
// ==========================================

use crate::domain::exam::{ExamRecord, QuestionCandidate, QuestionRecord};
use crate::domain::report::Finding;
use crate::domain::types::FindingKind;
use std::collections::HashMap;
use tracing::warn;

/// Link question candidates to exams by exact title match.
///
/// Returns the exam-id -> questions map plus one warning per
/// candidate whose declared title matches no exam; such candidates
/// are dropped rather than attached to a missing parent.
pub fn link_questions(
    candidates: Vec<QuestionCandidate>,
    exams: &mut [ExamRecord],
) -> (HashMap<String, Vec<QuestionRecord>>, Vec<Finding>) {
    let mut linked: HashMap<String, Vec<QuestionRecord>> = HashMap::new();
    let mut findings = Vec::new();

    for candidate in candidates {
        let parent = exams
            .iter_mut()
            .find(|exam| exam.title == candidate.exam_title);

        match parent {
            Some(exam) => {
                exam.question_ids.push(candidate.record.id.clone());
                linked
                    .entry(exam.id.clone())
                    .or_default()
                    .push(candidate.record);
            }
            None => {
                warn!(
                    exam_title = %candidate.exam_title,
                    row = ?candidate.row_number,
                    "question references unknown exam"
                );
                let mut finding = Finding::warning(
                    FindingKind::Data,
                    format!(
                        "missing_data: question references unknown exam title \"{}\"",
                        candidate.exam_title
                    ),
                );
                if let Some(row) = candidate.row_number {
                    finding = finding.with_row(row);
                }
                findings.push(finding.with_field("exam_title"));
            }
        }
    }

    (linked, findings)
}
