// ==========================================
// Exam Import Pipeline - Source Readers
// ==========================================
// Stage 0: raw byte buffer -> uniform in-memory shape.
// Excel and CSV decode to RawTable; the hierarchical
// document format decodes to a DocumentGraph. Decode
// failures here are fatal to the whole call; every
// later stage is row-scoped.
// ==========================================

use crate::importer::cell::{RawCell, RawTable};
use crate::importer::error::{ImportError, Result};
use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

// Sheet-name candidates, matched case-insensitively in both
// substring directions ("Exams" matches "exam", "đề thi 2024"
// matches "đề thi").
const EXAM_SHEET_CANDIDATES: &[&str] = &["exam", "đề thi", "de thi"];
const QUESTION_SHEET_CANDIDATES: &[&str] = &["question", "câu hỏi", "cau hoi"];

// ==========================================
// Excel reader
// ==========================================

/// Decode an xlsx workbook into the exam table plus the optional
/// companion question table.
///
/// # Errors
/// - `ExcelDecodeError`: undecodable byte buffer or no worksheets
/// - `EmptyTable`: the exam sheet has fewer than two rows
pub fn decode_excel(bytes: &[u8]) -> Result<(RawTable, Option<RawTable>)> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(ImportError::ExcelDecodeError(
            "workbook contains no sheets".to_string(),
        ));
    }

    // Exam sheet: first candidate hit, else the first sheet.
    let exam_sheet = pick_sheet(&sheet_names, EXAM_SHEET_CANDIDATES)
        .unwrap_or_else(|| sheet_names[0].clone());
    debug!(sheet = %exam_sheet, "selected exam sheet");

    let range = workbook.worksheet_range(&exam_sheet)?;
    let exam_table = range_to_table(&range)?;

    // Question sheet is optional; its absence is not an error.
    let question_table = match pick_sheet(&sheet_names, QUESTION_SHEET_CANDIDATES) {
        Some(name) if name != exam_sheet => {
            debug!(sheet = %name, "selected question sheet");
            let range = workbook.worksheet_range(&name)?;
            range_to_table(&range).ok()
        }
        _ => None,
    };

    Ok((exam_table, question_table))
}

/// First sheet whose name contains (or is contained by) a candidate,
/// case-insensitively.
fn pick_sheet(sheet_names: &[String], candidates: &[&str]) -> Option<String> {
    for name in sheet_names {
        let folded = name.trim().to_lowercase();
        for candidate in candidates {
            if folded.contains(candidate) || candidate.contains(folded.as_str()) {
                return Some(name.clone());
            }
        }
    }
    None
}

fn range_to_table(range: &calamine::Range<Data>) -> Result<RawTable> {
    let mut rows = range.rows();
    let header_row = rows.next().ok_or(ImportError::EmptyTable)?;
    let headers: Vec<RawCell> = header_row.iter().map(data_to_cell).collect();

    let mut data_rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in rows.enumerate() {
        let cells: Vec<RawCell> = row.iter().map(data_to_cell).collect();
        // Skip all-blank rows; kept rows remember their source
        // position so findings stay aligned with the sheet.
        if cells.iter().all(RawCell::is_absent) {
            skipped += 1;
            continue;
        }
        data_rows.push((idx + 2, cells));
    }

    if data_rows.is_empty() {
        return Err(ImportError::EmptyTable);
    }

    Ok(RawTable::numbered(headers, data_rows, skipped))
}

fn data_to_cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Absent,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(RawCell::Timestamp)
            .unwrap_or(RawCell::Absent),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Absent,
    }
}

// ==========================================
// CSV reader
// ==========================================

/// Decode a comma-separated buffer into a RawTable.
///
/// Quoting follows the standard rules: `"`-wrapped fields, doubled
/// quotes for a literal quote, commas inside quoted spans are data.
///
/// # Errors
/// - `CsvDecodeError`: undecodable byte sequence
/// - `EmptyTable`: fewer than two rows
pub fn decode_csv(bytes: &[u8]) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate rows shorter than the header
        .from_reader(bytes);

    let headers: Vec<RawCell> = reader
        .headers()?
        .iter()
        .map(|h| RawCell::Text(h.trim().to_string()))
        .collect();

    if headers.iter().all(RawCell::is_absent) {
        return Err(ImportError::EmptyTable);
    }

    let mut data_rows = Vec::new();
    let mut skipped = 0usize;
    // The reader never surfaces fully-empty lines as records, so
    // source positions come from the reader's own line tracking and
    // swallowed lines show up as gaps. Gap detection assumes one
    // line per record; a quoted embedded newline only shifts the
    // skipped count, never a reported row.
    let mut expected_line = 2usize;
    for record in reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(expected_line);
        if line > expected_line {
            skipped += line - expected_line;
        }
        expected_line = line + 1;

        let cells: Vec<RawCell> = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    RawCell::Absent
                } else {
                    RawCell::Text(field.to_string())
                }
            })
            .collect();
        if cells.iter().all(RawCell::is_absent) {
            skipped += 1;
            continue;
        }
        data_rows.push((line, cells));
    }

    if data_rows.is_empty() {
        return Err(ImportError::EmptyTable);
    }

    Ok(RawTable::numbered(headers, data_rows, skipped))
}

// ==========================================
// Hierarchical document reader
// ==========================================
// Three accepted layouts, tried in order:
//   1. bare array of exam objects
//   2. { "exams": [...], "questions": { exam_id: [...] } }
//   3. { "exam": {...}, "questions": [...] }  (single-exam shorthand)
// All three normalize into DocumentGraph before extraction.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExamNode {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    #[serde(alias = "duration")]
    pub duration_minutes: Option<u32>,
    pub total_points: Option<f64>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "type")]
    pub exam_type: Option<String>,
    pub pass_percentage: Option<f64>,
    pub max_attempts: Option<u32>,
    pub shuffle_questions: Option<bool>,
    pub shuffle_answers: Option<bool>,
    pub show_results: Option<bool>,
    pub allow_review: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionNode {
    pub content: Option<String>,
    #[serde(alias = "correct")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestionNode {
    pub id: Option<String>,
    #[serde(alias = "exam")]
    pub exam_title: Option<String>,
    pub content: Option<String>,
    pub raw_content: Option<String>,
    #[serde(alias = "type")]
    pub question_type: Option<String>,
    pub difficulty: Option<String>,
    pub points: Option<f64>,
    pub options: Option<Vec<OptionNode>>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The normalized document shape handed to the record extractor.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    pub exams: Vec<ExamNode>,
    /// exam id -> question nodes structurally attached to that exam
    pub questions: HashMap<String, Vec<QuestionNode>>,
}

#[derive(Debug, Deserialize)]
struct ExamCollectionDoc {
    exams: Vec<ExamNode>,
    #[serde(default)]
    questions: HashMap<String, Vec<QuestionNode>>,
}

#[derive(Debug, Deserialize)]
struct SingleExamDoc {
    exam: ExamNode,
    #[serde(default)]
    questions: Vec<QuestionNode>,
}

/// Decode the hierarchical document format.
///
/// Each known schema is attempted in order; the document fails as
/// unrecognized only if none parse.
pub fn decode_document(bytes: &[u8]) -> Result<DocumentGraph> {
    // Surface syntax errors first so "not JSON at all" reads
    // differently from "JSON of an unknown shape".
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    // Layout 1: bare array of exams
    if let Ok(exams) = serde_json::from_value::<Vec<ExamNode>>(value.clone()) {
        debug!(exams = exams.len(), "document layout: bare exam array");
        return Ok(DocumentGraph {
            exams,
            questions: HashMap::new(),
        });
    }

    // Layout 2: { exams, questions }
    if let Ok(doc) = serde_json::from_value::<ExamCollectionDoc>(value.clone()) {
        debug!(exams = doc.exams.len(), "document layout: exam collection");
        return Ok(DocumentGraph {
            exams: doc.exams,
            questions: doc.questions,
        });
    }

    // Layout 3: { exam, questions } single-exam shorthand
    if let Ok(doc) = serde_json::from_value::<SingleExamDoc>(value) {
        debug!("document layout: single-exam shorthand");
        let mut exam = doc.exam;
        let key = match exam.id.clone() {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                exam.id = Some(id.clone());
                id
            }
        };
        let mut questions = HashMap::new();
        if !doc.questions.is_empty() {
            questions.insert(key, doc.questions);
        }
        return Ok(DocumentGraph {
            exams: vec![exam],
            questions,
        });
    }

    Err(ImportError::DocumentDecodeError(
        "unrecognized document shape (expected an exam array, an {exams, questions} object, \
         or an {exam, questions} object)"
            .to_string(),
    ))
}
