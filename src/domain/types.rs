// ==========================================
// Exam Import Pipeline - Domain Type Definitions
// ==========================================
// Enums shared by the import pipeline and the
// surrounding platform. Source files spell these
// values loosely, so each enum carries a permissive
// parser that falls back to its default.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Difficulty
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    /// Permissive parse; unrecognized input falls back to `Medium`.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" | "dễ" => Difficulty::Easy,
            "hard" | "khó" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

// ==========================================
// Exam Status
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamStatus {
    Draft,
    Published,
    Archived,
}

impl Default for ExamStatus {
    fn default() -> Self {
        ExamStatus::Draft
    }
}

impl ExamStatus {
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "published" | "active" => ExamStatus::Published,
            "archived" => ExamStatus::Archived,
            _ => ExamStatus::Draft,
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamStatus::Draft => write!(f, "DRAFT"),
            ExamStatus::Published => write!(f, "PUBLISHED"),
            ExamStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

// ==========================================
// Exam Type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamType {
    Practice,
    Quiz,
    Midterm,
    Final,
}

impl Default for ExamType {
    fn default() -> Self {
        ExamType::Practice
    }
}

impl ExamType {
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quiz" => ExamType::Quiz,
            "midterm" | "giữa kỳ" => ExamType::Midterm,
            "final" | "cuối kỳ" => ExamType::Final,
            _ => ExamType::Practice,
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamType::Practice => write!(f, "PRACTICE"),
            ExamType::Quiz => write!(f, "QUIZ"),
            ExamType::Midterm => write!(f, "MIDTERM"),
            ExamType::Final => write!(f, "FINAL"),
        }
    }
}

// ==========================================
// Question Type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::MultipleChoice
    }
}

impl QuestionType {
    pub fn parse_lossy(value: &str) -> Self {
        // Fold case and strip separators so "true_false", "TRUE FALSE"
        // and "TrueFalse" all land on the same arm.
        let folded: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match folded.as_str() {
            "truefalse" | "tf" | "đúngsai" => QuestionType::TrueFalse,
            "shortanswer" | "short" => QuestionType::ShortAnswer,
            "essay" | "tựluận" => QuestionType::Essay,
            _ => QuestionType::MultipleChoice,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "MULTIPLE_CHOICE"),
            QuestionType::TrueFalse => write!(f, "TRUE_FALSE"),
            QuestionType::ShortAnswer => write!(f, "SHORT_ANSWER"),
            QuestionType::Essay => write!(f, "ESSAY"),
        }
    }
}

// ==========================================
// Import Format
// ==========================================
// The three physical layouts the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Excel,
    Csv,
    Json,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportFormat::Excel => write!(f, "excel"),
            ImportFormat::Csv => write!(f, "csv"),
            ImportFormat::Json => write!(f, "json"),
        }
    }
}

// ==========================================
// Finding Severity
// ==========================================
// error = blocking (flips overall success to false)
// warning = informational (never blocks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// ==========================================
// Finding Kind
// ==========================================
// format     = the file cannot be decoded at all (fatal to the call)
// validation = a decoded record fails a business rule (row-scoped)
// data       = an unexpected value shape while processing one row (row-scoped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Format,
    Validation,
    Data,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::Format => write!(f, "format"),
            FindingKind::Validation => write!(f, "validation"),
            FindingKind::Data => write!(f, "data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_lossy() {
        assert_eq!(Difficulty::parse_lossy("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_lossy("  hard "), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lossy("whatever"), Difficulty::Medium);
        assert_eq!(Difficulty::parse_lossy(""), Difficulty::Medium);
    }

    #[test]
    fn test_question_type_parse_lossy() {
        assert_eq!(
            QuestionType::parse_lossy("true_false"),
            QuestionType::TrueFalse
        );
        assert_eq!(
            QuestionType::parse_lossy("TRUE FALSE"),
            QuestionType::TrueFalse
        );
        assert_eq!(QuestionType::parse_lossy("essay"), QuestionType::Essay);
        assert_eq!(
            QuestionType::parse_lossy("multiple_choice"),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            QuestionType::parse_lossy("???"),
            QuestionType::MultipleChoice
        );
    }

    #[test]
    fn test_exam_status_parse_lossy() {
        assert_eq!(ExamStatus::parse_lossy("Published"), ExamStatus::Published);
        assert_eq!(ExamStatus::parse_lossy("draft"), ExamStatus::Draft);
        assert_eq!(ExamStatus::parse_lossy("n/a"), ExamStatus::Draft);
    }
}
