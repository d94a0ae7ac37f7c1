// ==========================================
// Exam Import Pipeline - Importer Error Types
// ==========================================
// thiserror derive; variants grouped by pipeline
// stage. Row-scoped problems are reported as findings
// instead of errors, so this enum only covers the
// cases that stop a stage outright.
// ==========================================

use thiserror::Error;

/// Import pipeline error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File / byte-buffer errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported format: {0} (expected excel/csv/json)")]
    UnsupportedFormat(String),

    #[error("failed to read source: {0}")]
    SourceReadError(String),

    // ===== Decode errors (fatal to the whole call) =====
    #[error("excel decode failed: {0}")]
    ExcelDecodeError(String),

    #[error("csv decode failed: {0}")]
    CsvDecodeError(String),

    #[error("document decode failed: {0}")]
    DocumentDecodeError(String),

    #[error("source contains no data rows (header plus at least one row required)")]
    EmptyTable,

    // ===== Template generation =====
    #[error("template generation failed: {0}")]
    TemplateError(String),

    // ===== Catch-all =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::SourceReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvDecodeError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelDecodeError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::DocumentDecodeError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImportError::TemplateError(err.to_string())
    }
}

/// Result alias for the importer
pub type Result<T> = std::result::Result<T, ImportError>;
