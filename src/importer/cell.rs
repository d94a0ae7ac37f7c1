// ==========================================
// Exam Import Pipeline - Raw Cell Model
// ==========================================
// The seam that makes the three source readers
// interchangeable: every physical format decodes to
// RawCell before any business logic runs. Converters
// are best-effort; callers supply the default.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// RawCell - one decoded cell value
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Absent,
}

impl RawCell {
    /// Trimmed text content; Absent and blank text map to None.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawCell::Number(n) => Some(format_number(*n)),
            RawCell::Bool(b) => Some(b.to_string()),
            RawCell::Timestamp(ts) => Some(ts.to_string()),
            RawCell::Absent => None,
        }
    }

    /// Best-effort numeric coercion; unparsable input yields None
    /// so the caller can substitute the field default.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            RawCell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            RawCell::Timestamp(_) | RawCell::Absent => None,
        }
    }

    /// Integer coercion via f64 (spreadsheets store everything as float).
    /// Negative values yield None; exam counters are unsigned.
    pub fn as_u32(&self) -> Option<u32> {
        self.as_f64().and_then(|n| {
            if n.is_finite() && n >= 0.0 {
                Some(n.round() as u32)
            } else {
                None
            }
        })
    }

    /// Boolean coercion accepting the spellings source files use.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawCell::Bool(b) => Some(*b),
            RawCell::Number(n) => Some(*n != 0.0),
            RawCell::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "có" => Some(true),
                "false" | "no" | "n" | "0" | "không" => Some(false),
                _ => None,
            },
            RawCell::Timestamp(_) | RawCell::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            RawCell::Absent => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Render a float the way a header or id cell expects: integral
/// values without the trailing ".0" a plain to_string would add.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// RawTable - headers plus data rows
// ==========================================
// Invariants: rows are padded with Absent to header
// width on construction, so column indices from the
// field map are always in bounds; row_numbers runs
// parallel to rows and keeps the 1-based source
// position of each kept row (header included in the
// offset), so findings still point at the right line
// after blank rows are dropped.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<RawCell>,
    pub rows: Vec<Vec<RawCell>>,
    /// 1-based source position of each kept row.
    pub row_numbers: Vec<usize>,
    /// All-blank source rows dropped during decode.
    pub skipped_rows: usize,
}

impl RawTable {
    /// Gapless table: rows occupy consecutive source positions
    /// starting right below the header.
    pub fn new(headers: Vec<RawCell>, rows: Vec<Vec<RawCell>>) -> Self {
        let numbered = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (idx + 2, row))
            .collect();
        Self::numbered(headers, numbered, 0)
    }

    /// Table with explicit source positions, used by the decoders
    /// after they drop blank rows.
    pub fn numbered(
        headers: Vec<RawCell>,
        rows: Vec<(usize, Vec<RawCell>)>,
        skipped_rows: usize,
    ) -> Self {
        let width = headers.len();
        let mut row_numbers = Vec::with_capacity(rows.len());
        let rows = rows
            .into_iter()
            .map(|(number, mut row)| {
                row_numbers.push(number);
                while row.len() < width {
                    row.push(RawCell::Absent);
                }
                row
            })
            .collect();
        Self {
            headers,
            rows,
            row_numbers,
            skipped_rows,
        }
    }

    /// Header texts, trimmed; absent headers become empty strings.
    pub fn header_texts(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| h.as_text().unwrap_or_default())
            .collect()
    }
}
