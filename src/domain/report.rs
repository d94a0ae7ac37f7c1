// ==========================================
// Exam Import Pipeline - Findings & Result Model
// ==========================================
// The caller-facing half of the domain: options in,
// findings / summary / result out. Everything here is
// freshly allocated per import call and carries no
// state between calls.
// ==========================================

use crate::domain::exam::{ExamRecord, QuestionRecord};
use crate::domain::types::{FindingKind, ImportFormat, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ImportOptions - per-call configuration
// ==========================================
// Threaded explicitly through every stage; the
// pipeline keeps no ambient configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    pub format: ImportFormat,
    pub validate_data: bool,
    pub skip_errors: bool,
    pub default_subject: Option<String>,
    pub default_duration: Option<u32>, // minutes
}

impl ImportOptions {
    pub fn new(format: ImportFormat) -> Self {
        Self {
            format,
            validate_data: true,
            skip_errors: true,
            default_subject: None,
            default_duration: None,
        }
    }
}

// ==========================================
// Finding - one observation about the input
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub row: Option<usize>,      // 1-based source row (header included in the offset)
    pub field: Option<String>,   // canonical field name, when the finding is field-scoped
    pub message: String,
    pub suggestion: Option<String>, // remediation hint (warnings only)
}

impl Finding {
    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            row: None,
            field: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            row: None,
            field: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ==========================================
// ImportSummary - counters
// ==========================================
// Derived by counting during aggregation, never
// mutated independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub successful_exams: usize,
    pub failed_exams: usize,
    pub total_questions: usize,
    pub skipped_rows: usize,
}

// ==========================================
// ImportResult - the caller-visible outcome
// ==========================================
// success is computed, never set directly:
// success == (errors.is_empty())
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub exams: Vec<ExamRecord>,
    /// exam id -> linked questions
    pub questions: HashMap<String, Vec<QuestionRecord>>,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub summary: ImportSummary,
}

impl ImportResult {
    /// An all-failed result carrying a single format-level error.
    /// Used when the input cannot be decoded at all, so the caller
    /// still receives a complete result instead of a raised error.
    pub fn format_failure(finding: Finding) -> Self {
        Self {
            success: false,
            exams: Vec::new(),
            questions: HashMap::new(),
            errors: vec![finding],
            warnings: Vec::new(),
            summary: ImportSummary::default(),
        }
    }
}
