// ==========================================
// Exam Import Pipeline - Orchestration
// ==========================================
// Control flow: bytes -> decode -> field map ->
// extract -> link -> validate -> aggregate.
// Once the bytes are in memory everything runs
// synchronously to completion; the caller always
// receives a complete ImportResult, never a raised
// error for data-shape problems.
// ==========================================

use crate::domain::exam::ExamRecord;
use crate::domain::report::{Finding, ImportOptions, ImportResult};
use crate::domain::types::{FindingKind, ImportFormat};
use crate::importer::aggregator::ResultAggregator;
use crate::importer::byte_source::{ByteSource, FileByteSource};
use crate::importer::cell::RawTable;
use crate::importer::cross_referencer::link_questions;
use crate::importer::error::{ImportError, Result};
use crate::importer::field_mapper::{
    build_field_map, EXAM_FIELD_CANDIDATES, QUESTION_FIELD_CANDIDATES,
};
use crate::importer::record_extractor::{
    extract_exam, extract_exam_from_node, extract_question, extract_question_from_node,
};
use crate::importer::source_reader::{decode_csv, decode_document, decode_excel, DocumentGraph};
use crate::importer::validator::validate_exam;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Import from an external byte source.
///
/// The one suspension point of the pipeline: the source read is
/// awaited, then the rest runs synchronously. A failed read becomes
/// a single format-kind error finding in an all-failed result
/// instead of a propagated error.
pub async fn import_from_source(
    source: &dyn ByteSource,
    options: &ImportOptions,
) -> ImportResult {
    info!(source = %source.describe(), format = %options.format, "starting import");
    match source.read_bytes().await {
        Ok(bytes) => import_bytes(&bytes, options),
        Err(e) => {
            error!(source = %source.describe(), error = %e, "source read failed");
            ImportResult::format_failure(Finding::error(
                FindingKind::Format,
                format!("failed to read source: {}", e),
            ))
        }
    }
}

/// Convenience wrapper over [`import_from_source`] for on-disk files.
pub async fn import_file<P: AsRef<Path>>(path: P, options: &ImportOptions) -> ImportResult {
    let source = FileByteSource::new(path);
    import_from_source(&source, options).await
}

/// Resolve a user-supplied format name.
///
/// # Errors
/// - `UnsupportedFormat`: the name matches none of the accepted formats
pub fn parse_format(name: &str) -> Result<ImportFormat> {
    match name.trim().to_lowercase().as_str() {
        "excel" | "xlsx" | "xls" => Ok(ImportFormat::Excel),
        "csv" => Ok(ImportFormat::Csv),
        "json" => Ok(ImportFormat::Json),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

/// Import an in-memory buffer. Pure and synchronous; all I/O has
/// already happened by the time this runs.
#[instrument(skip(bytes, options), fields(format = %options.format))]
pub fn import_bytes(bytes: &[u8], options: &ImportOptions) -> ImportResult {
    let decoded = match options.format {
        ImportFormat::Excel => decode_excel(bytes).map(|(exams, questions)| {
            import_tabular(exams, questions, options)
        }),
        ImportFormat::Csv => decode_csv(bytes).map(|table| import_tabular(table, None, options)),
        ImportFormat::Json => decode_document(bytes).map(|graph| import_document(graph, options)),
    };

    // Format errors are fatal: detected before any row processing,
    // they short-circuit to an all-failed result with no records.
    decoded.unwrap_or_else(|e: ImportError| {
        error!(error = %e, "decode failed");
        ImportResult::format_failure(Finding::error(FindingKind::Format, e.to_string()))
    })
}

// ==========================================
// Tabular path (Excel / CSV)
// ==========================================
fn import_tabular(
    exam_table: RawTable,
    question_table: Option<RawTable>,
    options: &ImportOptions,
) -> ImportResult {
    debug!(
        exam_rows = exam_table.rows.len(),
        question_rows = question_table.as_ref().map(|t| t.rows.len()).unwrap_or(0),
        "decoding complete"
    );

    // Stage 1: field maps
    let exam_map = build_field_map(&exam_table.header_texts(), EXAM_FIELD_CANDIDATES);

    // Stage 2: extraction (pure, never fails; defaults fill gaps).
    // The decoders recorded each row's 1-based source position, so
    // findings keep pointing at the right line even after blank
    // rows were dropped.
    let mut exams: Vec<ExamRecord> = Vec::with_capacity(exam_table.rows.len());
    for row in &exam_table.rows {
        exams.push(extract_exam(row, &exam_map, options));
    }

    let mut candidates = Vec::new();
    let mut question_skipped = 0;
    if let Some(table) = question_table {
        let question_map = build_field_map(&table.header_texts(), QUESTION_FIELD_CANDIDATES);
        for (row, number) in table.rows.iter().zip(table.row_numbers.iter().copied()) {
            candidates.push(extract_question(row, &question_map, number));
        }
        question_skipped = table.skipped_rows;
    }
    info!(
        exams = exams.len(),
        questions = candidates.len(),
        "extraction complete"
    );

    // Stage 3: cross-reference questions by exact title
    let (linked, link_warnings) = link_questions(candidates, &mut exams);

    // Stage 4+5: validate and aggregate
    let mut aggregator = ResultAggregator::new(options.skip_errors);
    aggregator.add_skipped_rows(exam_table.skipped_rows + question_skipped);
    for (exam, row_number) in exams.into_iter().zip(exam_table.row_numbers.iter().copied()) {
        let findings = if options.validate_data {
            validate_exam(&exam, Some(row_number))
        } else {
            Vec::new()
        };
        aggregator.record_exam(exam, findings);
    }
    aggregator.push_findings(link_warnings);
    aggregator.attach_questions(linked);
    aggregator.finish()
}

// ==========================================
// Document path (hierarchical format)
// ==========================================
// Questions here are structurally keyed by exam id,
// so no title join is needed; an unknown key gets the
// same missing-parent warning the title join emits.
fn import_document(graph: DocumentGraph, options: &ImportOptions) -> ImportResult {
    debug!(
        exams = graph.exams.len(),
        question_groups = graph.questions.len(),
        "document decoded"
    );

    let mut exams: Vec<ExamRecord> = graph
        .exams
        .iter()
        .map(|node| extract_exam_from_node(node, options))
        .collect();

    let mut linked = HashMap::new();
    let mut link_warnings = Vec::new();
    for (exam_id, nodes) in &graph.questions {
        match exams.iter_mut().find(|exam| exam.id == *exam_id) {
            Some(exam) => {
                let records: Vec<_> = nodes.iter().map(extract_question_from_node).collect();
                for record in &records {
                    exam.question_ids.push(record.id.clone());
                }
                linked.insert(exam.id.clone(), records);
            }
            None => {
                link_warnings.push(
                    Finding::warning(
                        FindingKind::Data,
                        format!(
                            "missing_data: questions reference unknown exam id \"{}\"",
                            exam_id
                        ),
                    )
                    .with_field("exam_id"),
                );
            }
        }
    }

    let mut aggregator = ResultAggregator::new(options.skip_errors);
    for exam in exams {
        let findings = if options.validate_data {
            validate_exam(&exam, None)
        } else {
            Vec::new()
        };
        aggregator.record_exam(exam, findings);
    }
    aggregator.push_findings(link_warnings);
    aggregator.attach_questions(linked);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_options() -> ImportOptions {
        ImportOptions::new(ImportFormat::Csv)
    }

    #[test]
    fn test_csv_import_basic() {
        let bytes = b"title,subject,duration (minutes)\nExam A,Math,90\nExam B,Physics,45\n";
        let result = import_bytes(bytes, &csv_options());

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.exams.len(), 2);
        assert_eq!(result.exams[0].title, "Exam A");
        assert_eq!(result.exams[1].duration_minutes, 45);
        assert_eq!(result.summary.total_rows, 2);
        assert_eq!(result.summary.successful_exams, 2);
    }

    #[test]
    fn test_csv_undecodable_is_single_format_error() {
        // header only, no data rows
        let result = import_bytes(b"title,subject\n", &csv_options());

        assert!(!result.success);
        assert!(result.exams.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, FindingKind::Format);
    }

    #[test]
    fn test_validate_data_false_skips_rules() {
        let bytes = b"title,subject\n,Math\n";
        let mut options = csv_options();
        options.validate_data = false;

        let result = import_bytes(bytes, &options);

        assert!(result.success);
        assert_eq!(result.exams.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_json_collection_import() {
        let bytes = br#"{
            "exams": [{"id": "e1", "title": "Exam A", "subject": "Math"}],
            "questions": {"e1": [{"content": "1 + 1 = ?", "points": 2.0}]}
        }"#;
        let mut options = csv_options();
        options.format = ImportFormat::Json;

        let result = import_bytes(bytes, &options);

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.exams.len(), 1);
        assert_eq!(result.exams[0].question_ids.len(), 1);
        assert_eq!(result.questions.get("e1").map(Vec::len), Some(1));
        assert_eq!(result.summary.total_questions, 1);
    }

    #[test]
    fn test_json_unknown_question_key_warns() {
        let bytes = br#"{
            "exams": [{"id": "e1", "title": "Exam A", "subject": "Math"}],
            "questions": {"ghost": [{"content": "orphan"}]}
        }"#;
        let mut options = csv_options();
        options.format = ImportFormat::Json;

        let result = import_bytes(bytes, &options);

        assert!(result.success);
        assert!(result.questions.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("ghost"));
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!(parse_format("excel").unwrap(), ImportFormat::Excel);
        assert_eq!(parse_format("XLSX").unwrap(), ImportFormat::Excel);
        assert_eq!(parse_format(" csv ").unwrap(), ImportFormat::Csv);
        assert_eq!(parse_format("json").unwrap(), ImportFormat::Json);
        assert!(matches!(
            parse_format("xml"),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }
}
