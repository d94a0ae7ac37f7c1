// ==========================================
// Exam Import Pipeline - Domain Layer
// ==========================================
// Entities and shared types. The importer writes
// these records; the rest of the platform only reads
// them.
// ==========================================

pub mod exam;
pub mod report;
pub mod types;

pub use exam::{AnswerOption, ExamRecord, QuestionCandidate, QuestionRecord};
pub use report::{Finding, ImportOptions, ImportResult, ImportSummary};
pub use types::{
    Difficulty, ExamStatus, ExamType, FindingKind, ImportFormat, QuestionType, Severity,
};
