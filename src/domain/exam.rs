// ==========================================
// Exam Import Pipeline - Exam Domain Model
// ==========================================
// Records produced by the import pipeline. The
// importer writes these; the platform persists and
// renders them. Immutable once validated.
// ==========================================

use crate::domain::types::{Difficulty, ExamStatus, ExamType, QuestionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ExamRecord - canonical exam
// ==========================================
// One record per exam row / document node. Ownership
// is transferred wholesale into ImportResult.exams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    // ===== Identity =====
    pub id: String, // generated (UUID v4) when the source carries none

    // ===== Descriptive fields =====
    pub title: String,
    pub subject: String,
    pub description: String,
    pub instructions: String,

    // ===== Grading & shape =====
    pub duration_minutes: u32, // integer >= 0
    pub total_points: f64,
    pub difficulty: Difficulty,
    pub status: ExamStatus,
    pub exam_type: ExamType,
    pub pass_percentage: f64,
    pub max_attempts: u32,

    // ===== Behavior flags =====
    pub shuffle_questions: bool,
    pub shuffle_answers: bool,
    pub show_results: bool,
    pub allow_review: bool,

    // ===== Links =====
    pub tags: Vec<String>,
    pub question_ids: Vec<String>, // filled by the cross-referencer
}

// ==========================================
// AnswerOption - one choice of a question
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub content: String,
    pub is_correct: bool,
}

// ==========================================
// QuestionRecord - canonical question
// ==========================================
// Owned by the exam it is linked to once the
// cross-referencer runs; before that it travels as a
// QuestionCandidate carrying only the plain-text exam
// title it claims to belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    // ===== Identity =====
    pub id: String, // generated (UUID v4) when the source carries none

    // ===== Content =====
    pub content: String,
    pub raw_content: String, // untouched source text, kept for re-editing

    // ===== Classification =====
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub points: f64,

    // ===== Answers =====
    pub options: Vec<AnswerOption>, // up to four
    pub correct_answer: String,
    pub explanation: String,

    // ===== Metadata =====
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// QuestionCandidate - pre-link intermediate
// ==========================================
// Pipeline-internal product of the record extractor:
// a question plus the exam title used for the join.
#[derive(Debug, Clone)]
pub struct QuestionCandidate {
    pub exam_title: String,
    pub row_number: Option<usize>, // source row for findings; None for document nodes
    pub record: QuestionRecord,
}
