// ==========================================
// Exam Import Pipeline - Template Generator
// ==========================================
// The inverse of the source readers: emit a minimal,
// correctly-shaped example file in the requested
// physical format so users can bootstrap their own
// input. Round-tripping a template through the
// pipeline with default options yields success with
// zero findings.
// ==========================================

use crate::domain::types::ImportFormat;
use crate::importer::error::{ImportError, Result};
use rust_xlsxwriter::Workbook;
use serde_json::json;

pub const EXAM_TEMPLATE_HEADERS: &[&str] = &[
    "Title",
    "Subject",
    "Description",
    "Instructions",
    "Duration (minutes)",
    "Total Points",
    "Difficulty",
    "Status",
    "Exam Type",
    "Pass Percentage",
    "Max Attempts",
    "Shuffle Questions",
    "Shuffle Answers",
    "Show Results",
    "Allow Review",
    "Tags",
];

pub const QUESTION_TEMPLATE_HEADERS: &[&str] = &[
    "Exam Title",
    "Content",
    "Question Type",
    "Difficulty",
    "Points",
    "Option A",
    "Option B",
    "Option C",
    "Option D",
    "Correct Answer",
    "Explanation",
    "Tags",
];

const SAMPLE_EXAM_TITLE: &str = "Sample Midterm Exam";

/// Generate a re-importable template in the requested format.
///
/// The Excel variant carries both sheets, the JSON variant the
/// single-exam shorthand; the delimited layout has no companion
/// question table, so its template is the exam table alone.
pub fn generate_import_template(format: ImportFormat) -> Result<Vec<u8>> {
    match format {
        ImportFormat::Excel => generate_excel_template(),
        ImportFormat::Csv => generate_csv_template(),
        ImportFormat::Json => generate_json_template(),
    }
}

// ==========================================
// Excel template (two sheets)
// ==========================================
fn generate_excel_template() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let exams = workbook.add_worksheet();
    exams.set_name("Exams")?;
    for (col, header) in EXAM_TEMPLATE_HEADERS.iter().enumerate() {
        exams.write_string(0, col as u16, *header)?;
    }
    exams.write_string(1, 0, SAMPLE_EXAM_TITLE)?;
    exams.write_string(1, 1, "Mathematics")?;
    exams.write_string(1, 2, "Covers chapters 1-5")?;
    exams.write_string(1, 3, "Answer all questions")?;
    exams.write_number(1, 4, 60.0)?;
    exams.write_number(1, 5, 100.0)?;
    exams.write_string(1, 6, "MEDIUM")?;
    exams.write_string(1, 7, "DRAFT")?;
    exams.write_string(1, 8, "MIDTERM")?;
    exams.write_number(1, 9, 50.0)?;
    exams.write_number(1, 10, 1.0)?;
    exams.write_boolean(1, 11, false)?;
    exams.write_boolean(1, 12, false)?;
    exams.write_boolean(1, 13, true)?;
    exams.write_boolean(1, 14, true)?;
    exams.write_string(1, 15, "algebra,sample")?;

    let questions = workbook.add_worksheet();
    questions.set_name("Questions")?;
    for (col, header) in QUESTION_TEMPLATE_HEADERS.iter().enumerate() {
        questions.write_string(0, col as u16, *header)?;
    }
    questions.write_string(1, 0, SAMPLE_EXAM_TITLE)?;
    questions.write_string(1, 1, "What is 2 + 2?")?;
    questions.write_string(1, 2, "MULTIPLE_CHOICE")?;
    questions.write_string(1, 3, "EASY")?;
    questions.write_number(1, 4, 1.0)?;
    questions.write_string(1, 5, "3")?;
    questions.write_string(1, 6, "4")?;
    questions.write_string(1, 7, "5")?;
    questions.write_string(1, 8, "6")?;
    questions.write_string(1, 9, "B")?;
    questions.write_string(1, 10, "Basic addition")?;
    questions.write_string(1, 11, "arithmetic")?;

    Ok(workbook.save_to_buffer()?)
}

// ==========================================
// CSV template (exam table only)
// ==========================================
fn generate_csv_template() -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXAM_TEMPLATE_HEADERS)?;
    writer.write_record([
        SAMPLE_EXAM_TITLE,
        "Mathematics",
        "Covers chapters 1-5",
        "Answer all questions",
        "60",
        "100",
        "MEDIUM",
        "DRAFT",
        "MIDTERM",
        "50",
        "1",
        "false",
        "false",
        "true",
        "true",
        "algebra,sample",
    ])?;
    writer
        .into_inner()
        .map_err(|e| ImportError::TemplateError(e.to_string()))
}

// ==========================================
// JSON template (single-exam shorthand)
// ==========================================
fn generate_json_template() -> Result<Vec<u8>> {
    let document = json!({
        "exam": {
            "title": SAMPLE_EXAM_TITLE,
            "subject": "Mathematics",
            "description": "Covers chapters 1-5",
            "instructions": "Answer all questions",
            "duration_minutes": 60,
            "total_points": 100.0,
            "difficulty": "MEDIUM",
            "status": "DRAFT",
            "exam_type": "MIDTERM",
            "pass_percentage": 50.0,
            "max_attempts": 1,
            "shuffle_questions": false,
            "shuffle_answers": false,
            "show_results": true,
            "allow_review": true,
            "tags": ["algebra", "sample"]
        },
        "questions": [
            {
                "content": "What is 2 + 2?",
                "question_type": "MULTIPLE_CHOICE",
                "difficulty": "EASY",
                "points": 1.0,
                "options": [
                    {"content": "3", "is_correct": false},
                    {"content": "4", "is_correct": true},
                    {"content": "5", "is_correct": false},
                    {"content": "6", "is_correct": false}
                ],
                "correct_answer": "B",
                "explanation": "Basic addition",
                "tags": ["arithmetic"]
            }
        ]
    });

    Ok(serde_json::to_vec_pretty(&document)?)
}
