// ==========================================
// Exam Import Pipeline - Record Extractor
// ==========================================
// Stage 2: mapped row / document node -> candidate
// record. Pure functions that never fail: missing or
// unparsable data falls back to per-field defaults,
// so one malformed row surfaces as a finding later
// instead of halting the batch. Required-field checks
// live in the validator, not here.
// ==========================================

use crate::domain::exam::{AnswerOption, ExamRecord, QuestionCandidate, QuestionRecord};
use crate::domain::report::ImportOptions;
use crate::domain::types::{Difficulty, ExamStatus, ExamType, QuestionType};
use crate::importer::cell::RawCell;
use crate::importer::field_mapper::FieldMap;
use crate::importer::source_reader::{ExamNode, QuestionNode};
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_PASS_PERCENTAGE: f64 = 50.0;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_QUESTION_POINTS: f64 = 1.0;

// ==========================================
// Tabular extraction (Excel / CSV rows)
// ==========================================

/// Extract one exam candidate from a data row.
pub fn extract_exam(row: &[RawCell], map: &FieldMap, options: &ImportOptions) -> ExamRecord {
    let subject = text(row, map, "subject")
        .or_else(|| options.default_subject.clone())
        .unwrap_or_default();

    let duration_minutes = cell(row, map, "duration_minutes")
        .as_u32()
        .or(options.default_duration)
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    ExamRecord {
        id: Uuid::new_v4().to_string(),
        title: text(row, map, "title").unwrap_or_default(),
        subject,
        description: text(row, map, "description").unwrap_or_default(),
        instructions: text(row, map, "instructions").unwrap_or_default(),
        duration_minutes,
        total_points: cell(row, map, "total_points").as_f64().unwrap_or(0.0),
        difficulty: parse_enum(row, map, "difficulty", Difficulty::parse_lossy),
        status: parse_enum(row, map, "status", ExamStatus::parse_lossy),
        exam_type: parse_enum(row, map, "exam_type", ExamType::parse_lossy),
        pass_percentage: cell(row, map, "pass_percentage")
            .as_f64()
            .unwrap_or(DEFAULT_PASS_PERCENTAGE),
        max_attempts: cell(row, map, "max_attempts")
            .as_u32()
            .unwrap_or(DEFAULT_MAX_ATTEMPTS),
        shuffle_questions: cell(row, map, "shuffle_questions").as_bool().unwrap_or(false),
        shuffle_answers: cell(row, map, "shuffle_answers").as_bool().unwrap_or(false),
        show_results: cell(row, map, "show_results").as_bool().unwrap_or(true),
        allow_review: cell(row, map, "allow_review").as_bool().unwrap_or(true),
        tags: split_tags(text(row, map, "tags")),
        question_ids: Vec::new(),
    }
}

/// Extract one question candidate from a data row.
///
/// `row_number` is the 1-based source row (header included in the
/// offset), carried along for findings.
pub fn extract_question(row: &[RawCell], map: &FieldMap, row_number: usize) -> QuestionCandidate {
    let content = text(row, map, "content").unwrap_or_default();
    let correct_answer = text(row, map, "correct_answer").unwrap_or_default();

    let mut options_list = Vec::new();
    for (letter, field) in [
        ("A", "option_a"),
        ("B", "option_b"),
        ("C", "option_c"),
        ("D", "option_d"),
    ] {
        if let Some(option_content) = text(row, map, field) {
            let is_correct = option_is_correct(letter, &option_content, &correct_answer);
            options_list.push(AnswerOption {
                content: option_content,
                is_correct,
            });
        }
    }

    let now = Utc::now();
    QuestionCandidate {
        exam_title: text(row, map, "exam_title").unwrap_or_default(),
        row_number: Some(row_number),
        record: QuestionRecord {
            id: Uuid::new_v4().to_string(),
            raw_content: content.clone(),
            content,
            question_type: parse_enum(row, map, "question_type", QuestionType::parse_lossy),
            difficulty: parse_enum(row, map, "difficulty", Difficulty::parse_lossy),
            points: cell(row, map, "points")
                .as_f64()
                .unwrap_or(DEFAULT_QUESTION_POINTS),
            options: options_list,
            correct_answer,
            explanation: text(row, map, "explanation").unwrap_or_default(),
            tags: split_tags(text(row, map, "tags")),
            created_at: now,
            updated_at: now,
        },
    }
}

/// The correct-answer column names an option either by letter
/// ("A".."D") or by repeating the option text verbatim.
fn option_is_correct(letter: &str, option_content: &str, correct_answer: &str) -> bool {
    let answer = correct_answer.trim();
    if answer.is_empty() {
        return false;
    }
    answer.eq_ignore_ascii_case(letter) || answer == option_content
}

// ==========================================
// Document extraction (hierarchical format)
// ==========================================

/// Extract one exam record from a document node, applying the same
/// defaults as the tabular path.
pub fn extract_exam_from_node(node: &ExamNode, options: &ImportOptions) -> ExamRecord {
    let subject = non_blank(node.subject.clone())
        .or_else(|| options.default_subject.clone())
        .unwrap_or_default();

    ExamRecord {
        id: non_blank(node.id.clone()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: non_blank(node.title.clone()).unwrap_or_default(),
        subject,
        description: non_blank(node.description.clone()).unwrap_or_default(),
        instructions: non_blank(node.instructions.clone()).unwrap_or_default(),
        duration_minutes: node
            .duration_minutes
            .or(options.default_duration)
            .unwrap_or(DEFAULT_DURATION_MINUTES),
        total_points: node.total_points.unwrap_or(0.0),
        difficulty: parse_node_enum(&node.difficulty, Difficulty::parse_lossy),
        status: parse_node_enum(&node.status, ExamStatus::parse_lossy),
        exam_type: parse_node_enum(&node.exam_type, ExamType::parse_lossy),
        pass_percentage: node.pass_percentage.unwrap_or(DEFAULT_PASS_PERCENTAGE),
        max_attempts: node.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        shuffle_questions: node.shuffle_questions.unwrap_or(false),
        shuffle_answers: node.shuffle_answers.unwrap_or(false),
        show_results: node.show_results.unwrap_or(true),
        allow_review: node.allow_review.unwrap_or(true),
        tags: node
            .tags
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        question_ids: Vec::new(),
    }
}

/// Extract one question record from a document node.
pub fn extract_question_from_node(node: &QuestionNode) -> QuestionRecord {
    let content = non_blank(node.content.clone()).unwrap_or_default();
    let now = Utc::now();

    QuestionRecord {
        id: non_blank(node.id.clone()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        raw_content: non_blank(node.raw_content.clone()).unwrap_or_else(|| content.clone()),
        content,
        question_type: parse_node_enum(&node.question_type, QuestionType::parse_lossy),
        difficulty: parse_node_enum(&node.difficulty, Difficulty::parse_lossy),
        points: node.points.unwrap_or(DEFAULT_QUESTION_POINTS),
        options: node
            .options
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|opt| {
                non_blank(opt.content).map(|content| AnswerOption {
                    content,
                    is_correct: opt.is_correct.unwrap_or(false),
                })
            })
            .collect(),
        correct_answer: non_blank(node.correct_answer.clone()).unwrap_or_default(),
        explanation: non_blank(node.explanation.clone()).unwrap_or_default(),
        tags: node
            .tags
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

// ==========================================
// Helpers
// ==========================================

/// Cell for a canonical field; a missing mapping reads as Absent.
fn cell<'a>(row: &'a [RawCell], map: &FieldMap, field: &str) -> &'a RawCell {
    map.get(field)
        .and_then(|idx| row.get(*idx))
        .unwrap_or(&RawCell::Absent)
}

fn text(row: &[RawCell], map: &FieldMap, field: &str) -> Option<String> {
    cell(row, map, field).as_text()
}

fn parse_enum<T>(row: &[RawCell], map: &FieldMap, field: &str, parse: fn(&str) -> T) -> T
where
    T: Default,
{
    text(row, map, field)
        .map(|v| parse(&v))
        .unwrap_or_default()
}

fn parse_node_enum<T>(value: &Option<String>, parse: fn(&str) -> T) -> T
where
    T: Default,
{
    value.as_deref().map(parse).unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Comma-joined tag string -> tag list, blanks discarded.
fn split_tags(value: Option<String>) -> Vec<String> {
    value
        .map(|joined| {
            joined
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ImportFormat;
    use crate::importer::field_mapper::{
        build_field_map, EXAM_FIELD_CANDIDATES, QUESTION_FIELD_CANDIDATES,
    };

    fn exam_map(headers: &[&str]) -> FieldMap {
        let headers: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        build_field_map(&headers, EXAM_FIELD_CANDIDATES)
    }

    fn text_row(values: &[&str]) -> Vec<RawCell> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    RawCell::Absent
                } else {
                    RawCell::Text((*v).to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_extract_exam_basic() {
        let map = exam_map(&["title", "subject", "duration (minutes)", "difficulty"]);
        let row = text_row(&["Midterm Algebra", "Math", "90", "hard"]);
        let options = ImportOptions::new(ImportFormat::Csv);

        let exam = extract_exam(&row, &map, &options);

        assert_eq!(exam.title, "Midterm Algebra");
        assert_eq!(exam.subject, "Math");
        assert_eq!(exam.duration_minutes, 90);
        assert_eq!(exam.difficulty, Difficulty::Hard);
        assert_eq!(exam.status, ExamStatus::Draft);
        assert!(!exam.id.is_empty());
    }

    #[test]
    fn test_extract_exam_duration_defaults() {
        let map = exam_map(&["title"]);
        let row = text_row(&["Exam A"]);

        // No option default: built-in 60
        let options = ImportOptions::new(ImportFormat::Csv);
        assert_eq!(
            extract_exam(&row, &map, &options).duration_minutes,
            DEFAULT_DURATION_MINUTES
        );

        // Option default wins when set
        let mut options = ImportOptions::new(ImportFormat::Csv);
        options.default_duration = Some(45);
        assert_eq!(extract_exam(&row, &map, &options).duration_minutes, 45);
    }

    #[test]
    fn test_extract_exam_unparsable_number_falls_back() {
        let map = exam_map(&["title", "duration (minutes)", "pass percentage"]);
        let row = text_row(&["Exam A", "soon", "n/a"]);
        let options = ImportOptions::new(ImportFormat::Csv);

        let exam = extract_exam(&row, &map, &options);

        assert_eq!(exam.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(exam.pass_percentage, DEFAULT_PASS_PERCENTAGE);
    }

    #[test]
    fn test_extract_exam_default_subject_option() {
        let map = exam_map(&["title"]);
        let row = text_row(&["Exam A"]);
        let mut options = ImportOptions::new(ImportFormat::Csv);
        options.default_subject = Some("General".to_string());

        assert_eq!(extract_exam(&row, &map, &options).subject, "General");
    }

    #[test]
    fn test_extract_exam_tags_split_and_blanks_dropped() {
        let map = exam_map(&["title", "tags"]);
        let row = text_row(&["Exam A", "algebra, , geometry ,"]);
        let options = ImportOptions::new(ImportFormat::Csv);

        let exam = extract_exam(&row, &map, &options);

        assert_eq!(exam.tags, vec!["algebra", "geometry"]);
    }

    #[test]
    fn test_extract_question_options_and_correct_letter() {
        let headers: Vec<String> = [
            "exam title",
            "content",
            "option a",
            "option b",
            "option c",
            "option d",
            "correct answer",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
        let map = build_field_map(&headers, QUESTION_FIELD_CANDIDATES);
        let row = text_row(&["Exam A", "1 + 1 = ?", "1", "2", "3", "4", "B"]);

        let candidate = extract_question(&row, &map, 2);

        assert_eq!(candidate.exam_title, "Exam A");
        assert_eq!(candidate.row_number, Some(2));
        assert_eq!(candidate.record.options.len(), 4);
        assert!(!candidate.record.options[0].is_correct);
        assert!(candidate.record.options[1].is_correct);
        assert_eq!(candidate.record.points, DEFAULT_QUESTION_POINTS);
    }

    #[test]
    fn test_extract_question_correct_by_content() {
        let headers: Vec<String> = ["content", "option a", "option b", "correct answer"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let map = build_field_map(&headers, QUESTION_FIELD_CANDIDATES);
        let row = text_row(&["Pick one", "Paris", "Hanoi", "Hanoi"]);

        let candidate = extract_question(&row, &map, 3);

        assert!(!candidate.record.options[0].is_correct);
        assert!(candidate.record.options[1].is_correct);
    }

    #[test]
    fn test_extract_exam_from_node_defaults() {
        let node = ExamNode {
            title: Some("Doc Exam".to_string()),
            ..ExamNode::default()
        };
        let options = ImportOptions::new(ImportFormat::Json);

        let exam = extract_exam_from_node(&node, &options);

        assert_eq!(exam.title, "Doc Exam");
        assert_eq!(exam.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(exam.difficulty, Difficulty::Medium);
        assert!(!exam.id.is_empty());
    }

    #[test]
    fn test_extract_question_from_node_keeps_raw_content() {
        let node = QuestionNode {
            content: Some("1 + 1 = ?".to_string()),
            raw_content: Some("$1 + 1 = ?$".to_string()),
            ..QuestionNode::default()
        };

        let question = extract_question_from_node(&node);

        assert_eq!(question.content, "1 + 1 = ?");
        assert_eq!(question.raw_content, "$1 + 1 = ?$");
    }
}
