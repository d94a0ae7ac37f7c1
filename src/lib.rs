// ==========================================
// Exam Import Pipeline - Core Library
// ==========================================
// Ingests exam and question datasets in three
// physical formats (Excel workbook, CSV, hierarchical
// JSON document) and produces a canonical, validated
// record set plus a row-granular finding report.
// The surrounding platform handles file selection,
// persistence and rendering; this crate only turns
// bytes into records.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - records and shared types
pub mod domain;

// Importer layer - the pipeline itself
pub mod importer;

// Logging setup
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::{
    AnswerOption, Difficulty, ExamRecord, ExamStatus, ExamType, Finding, FindingKind,
    ImportFormat, ImportOptions, ImportResult, ImportSummary, QuestionRecord, QuestionType,
    Severity,
};

// Pipeline entry points
pub use importer::{
    generate_import_template, import_bytes, import_file, import_from_source, parse_format,
    ByteSource, FileByteSource, ImportError, MemoryByteSource,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
