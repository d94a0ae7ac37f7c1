// ==========================================
// Import pipeline integration tests
// ==========================================
// End-to-end behavior over real byte buffers:
// decoding, header matching, validation severity,
// cross-referencing and summary arithmetic.
// ==========================================

use exam_importer::importer::import_bytes;
use exam_importer::{
    import_file, logging, FindingKind, ImportFormat, ImportOptions, Severity,
};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_options() -> ImportOptions {
    ImportOptions::new(ImportFormat::Csv)
}

// Five exam rows, the third with an empty title.
const FIVE_ROW_CSV: &[u8] = b"title,subject,duration (minutes)\n\
Exam A,Math,60\n\
Exam B,Math,60\n\
,Math,60\n\
Exam D,Math,60\n\
Exam E,Math,60\n";

#[test]
fn test_header_matching_is_case_and_whitespace_insensitive() {
    logging::init_test();
    let bytes = b"  TITLE  ,subject\nExam A,Math\n";
    let result = import_bytes(bytes, &csv_options());

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.exams[0].title, "Exam A");
}

#[test]
fn test_csv_quoted_comma_is_one_field() {
    let bytes = b"title,subject\n\"Sample, Exam\",\"Math\"\n";
    let result = import_bytes(bytes, &csv_options());

    assert!(result.success);
    assert_eq!(result.exams.len(), 1);
    assert_eq!(result.exams[0].title, "Sample, Exam");
    assert_eq!(result.exams[0].subject, "Math");
}

#[test]
fn test_row_isolation_with_skip_errors() {
    // skip_errors = true: the imperfect record is kept and reported
    let mut options = csv_options();
    options.skip_errors = true;
    let result = import_bytes(FIVE_ROW_CSV, &options);

    assert!(!result.success);
    assert_eq!(result.exams.len(), 5);
    assert_eq!(result.errors.len(), 1);
    // third data row, offset by the header row
    assert_eq!(result.errors[0].row, Some(4));
    assert_eq!(result.errors[0].field.as_deref(), Some("title"));
    assert_eq!(result.summary.total_rows, 5);

    // skip_errors = false: same finding, record absent from exams
    let mut options = csv_options();
    options.skip_errors = false;
    let result = import_bytes(FIVE_ROW_CSV, &options);

    assert!(!result.success);
    assert_eq!(result.exams.len(), 4);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, Some(4));
    assert!(result.exams.iter().all(|e| !e.title.is_empty()));
    assert_eq!(
        result.summary.successful_exams + result.summary.failed_exams,
        result.summary.total_rows
    );
}

#[test]
fn test_blank_row_does_not_shift_error_positions() {
    // blank row at source row 3, empty-title row at source row 4
    let bytes = b"title,subject\nExam A,Math\n,\n,Math\n";
    let result = import_bytes(bytes, &csv_options());

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, Some(4));
    assert_eq!(result.summary.skipped_rows, 1);
}

#[test]
fn test_fully_empty_line_does_not_shift_error_positions() {
    // a bare newline never surfaces from the reader as a record,
    // yet the rows below it keep their true positions
    let bytes = b"title,subject\nExam A,Math\n\n,Math\n";
    let result = import_bytes(bytes, &csv_options());

    assert!(!result.success);
    assert_eq!(result.errors[0].row, Some(4));
    assert_eq!(result.summary.skipped_rows, 1);
}

#[test]
fn test_later_rows_processed_after_bad_row() {
    let mut options = csv_options();
    options.skip_errors = false;
    let result = import_bytes(FIVE_ROW_CSV, &options);

    // rows 4 and 5 still imported
    assert!(result.exams.iter().any(|e| e.title == "Exam D"));
    assert!(result.exams.iter().any(|e| e.title == "Exam E"));
}

#[test]
fn test_duration_defaulting() {
    let bytes = b"title,subject\nExam A,Math\n";

    // built-in default
    let result = import_bytes(bytes, &csv_options());
    assert_eq!(result.exams[0].duration_minutes, 60);

    // option default wins
    let mut options = csv_options();
    options.default_duration = Some(45);
    let result = import_bytes(bytes, &options);
    assert_eq!(result.exams[0].duration_minutes, 45);
}

#[test]
fn test_empty_subject_warns_without_blocking() {
    let bytes = b"title,subject\nExam A,\n";
    let result = import_bytes(bytes, &csv_options());

    assert!(result.success);
    assert_eq!(result.exams.len(), 1);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].severity, Severity::Warning);
    assert!(result.warnings[0].suggestion.is_some());
}

#[test]
fn test_unsupported_bytes_yield_format_error_result() {
    let mut options = csv_options();
    options.format = ImportFormat::Excel;
    let result = import_bytes(b"definitely not a zip archive", &options);

    assert!(!result.success);
    assert!(result.exams.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, FindingKind::Format);
}

// ==========================================
// Excel cross-referencing
// ==========================================

fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let exams = workbook.add_worksheet();
    exams.set_name("Exams").unwrap();
    exams.write_string(0, 0, "Title").unwrap();
    exams.write_string(0, 1, "Subject").unwrap();
    exams.write_string(1, 0, "Algebra Midterm").unwrap();
    exams.write_string(1, 1, "Math").unwrap();
    exams.write_string(2, 0, "Optics Quiz").unwrap();
    exams.write_string(2, 1, "Physics").unwrap();

    let questions = workbook.add_worksheet();
    questions.set_name("Questions").unwrap();
    questions.write_string(0, 0, "Exam Title").unwrap();
    questions.write_string(0, 1, "Content").unwrap();
    questions.write_string(0, 2, "Correct Answer").unwrap();
    // linked question
    questions.write_string(1, 0, "Algebra Midterm").unwrap();
    questions.write_string(1, 1, "Solve x + 2 = 5").unwrap();
    questions.write_string(1, 2, "3").unwrap();
    // orphaned question (no matching exam title)
    questions.write_string(2, 0, "Ghost Exam").unwrap();
    questions.write_string(2, 1, "Orphan question").unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_excel_cross_reference_links_and_warns() {
    logging::init_test();
    let bytes = two_sheet_workbook();
    let options = ImportOptions::new(ImportFormat::Excel);

    let result = import_bytes(&bytes, &options);

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.exams.len(), 2);

    // exact title match linked into the algebra exam
    let algebra = result
        .exams
        .iter()
        .find(|e| e.title == "Algebra Midterm")
        .unwrap();
    assert_eq!(algebra.question_ids.len(), 1);
    let linked = result.questions.get(&algebra.id).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].content, "Solve x + 2 = 5");

    // the orphan produced a warning and was dropped
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("Ghost Exam"));
    assert_eq!(result.summary.total_questions, 1);

    // question rows never count toward exam row totals
    assert_eq!(result.summary.total_rows, 2);
}

#[test]
fn test_excel_blank_row_does_not_shift_error_positions() {
    let mut workbook = Workbook::new();
    let exams = workbook.add_worksheet();
    exams.write_string(0, 0, "Title").unwrap();
    exams.write_string(0, 1, "Subject").unwrap();
    exams.write_string(1, 0, "Exam A").unwrap();
    exams.write_string(1, 1, "Math").unwrap();
    // row index 2 left entirely blank; empty-title row below it
    exams.write_string(3, 1, "Math").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = import_bytes(&bytes, &ImportOptions::new(ImportFormat::Excel));

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, Some(4));
    assert_eq!(result.summary.skipped_rows, 1);
}

// ==========================================
// File-backed entry point
// ==========================================

#[tokio::test]
async fn test_import_file_csv() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"title,subject\nExam A,Math\n").unwrap();

    let result = import_file(file.path(), &csv_options()).await;

    assert!(result.success);
    assert_eq!(result.exams.len(), 1);
}

#[tokio::test]
async fn test_unreadable_source_becomes_format_finding() {
    let result = import_file("no_such_file.csv", &csv_options()).await;

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, FindingKind::Format);
    assert!(result.exams.is_empty());
}
