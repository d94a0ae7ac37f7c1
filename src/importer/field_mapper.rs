// ==========================================
// Exam Import Pipeline - Field Mapper
// ==========================================
// Stage 1: header row -> canonical-field column map.
// The matching policy is deliberately permissive:
// case-folded, trimmed, substring in either direction,
// first matching header wins. Renamed, reordered or
// partially-translated headers still map; unmatched
// fields simply fall back to their defaults downstream.
// ==========================================

use std::collections::HashMap;
use tracing::debug;

/// canonical field name -> zero-based column index
pub type FieldMap = HashMap<&'static str, usize>;

/// canonical field name -> accepted header spellings
pub type CandidateTable = &'static [(&'static str, &'static [&'static str])];

// ==========================================
// Canonical field candidates
// ==========================================

pub const EXAM_FIELD_CANDIDATES: CandidateTable = &[
    ("title", &["title", "exam title", "tên đề thi"]),
    ("subject", &["subject", "môn học"]),
    ("description", &["description", "mô tả"]),
    ("instructions", &["instructions", "hướng dẫn"]),
    (
        "duration_minutes",
        &["duration (minutes)", "duration", "thời gian (phút)"],
    ),
    ("total_points", &["total points", "tổng điểm"]),
    ("difficulty", &["difficulty", "độ khó"]),
    ("status", &["status", "trạng thái"]),
    ("exam_type", &["exam type", "type", "loại đề"]),
    (
        "pass_percentage",
        &["pass percentage", "pass", "điểm đạt (%)"],
    ),
    ("max_attempts", &["max attempts", "attempts", "số lần làm"]),
    ("shuffle_questions", &["shuffle questions", "trộn câu hỏi"]),
    ("shuffle_answers", &["shuffle answers", "trộn đáp án"]),
    ("show_results", &["show results", "hiện kết quả"]),
    ("allow_review", &["allow review", "cho phép xem lại"]),
    ("tags", &["tags", "thẻ"]),
];

pub const QUESTION_FIELD_CANDIDATES: CandidateTable = &[
    ("exam_title", &["exam title", "exam", "đề thi"]),
    ("content", &["content", "question", "nội dung"]),
    (
        "question_type",
        &["question type", "type", "loại câu hỏi"],
    ),
    ("difficulty", &["difficulty", "độ khó"]),
    ("points", &["points", "điểm"]),
    ("option_a", &["option a", "option 1", "đáp án a"]),
    ("option_b", &["option b", "option 2", "đáp án b"]),
    ("option_c", &["option c", "option 3", "đáp án c"]),
    ("option_d", &["option d", "option 4", "đáp án d"]),
    (
        "correct_answer",
        &["correct answer", "correct", "đáp án đúng"],
    ),
    ("explanation", &["explanation", "giải thích"]),
    ("tags", &["tags", "thẻ"]),
];

// ==========================================
// Map construction
// ==========================================

/// Build the field map for one table.
///
/// For each canonical field, headers are scanned left to right and
/// the first header matching any candidate wins. Unmatched fields
/// are absent from the map; that is not an error at this stage.
pub fn build_field_map(headers: &[String], candidates: CandidateTable) -> FieldMap {
    let folded: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let mut map = FieldMap::new();
    for &(field, names) in candidates {
        for (idx, header) in folded.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if names.iter().any(|name| headers_match(header, name)) {
                map.insert(field, idx);
                break;
            }
        }
    }

    debug!(
        mapped = map.len(),
        total = candidates.len(),
        "field map built"
    );
    map
}

/// A header matches a candidate when either string contains the
/// other after case-folding and trimming. Inputs arrive pre-folded.
fn headers_match(header: &str, candidate: &str) -> bool {
    header.contains(candidate) || candidate.contains(header)
}
