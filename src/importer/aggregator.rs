// ==========================================
// Exam Import Pipeline - Result Aggregator
// ==========================================
// Stage 5: accumulate records, findings and counters
// into the final ImportResult. Overall success is
// recomputed at the very end as "no error-severity
// finding exists" -- the single source of truth for
// the caller-visible pass/fail signal. Warnings from
// any stage never flip it.
// ==========================================

use crate::domain::exam::{ExamRecord, QuestionRecord};
use crate::domain::report::{Finding, ImportResult, ImportSummary};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

// ==========================================
// ResultAggregator
// ==========================================
pub struct ResultAggregator {
    skip_errors: bool,
    exams: Vec<ExamRecord>,
    questions: HashMap<String, Vec<QuestionRecord>>,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    total_rows: usize,
    successful_exams: usize,
    failed_exams: usize,
    skipped_rows: usize,
}

impl ResultAggregator {
    pub fn new(skip_errors: bool) -> Self {
        Self {
            skip_errors,
            exams: Vec::new(),
            questions: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            total_rows: 0,
            successful_exams: 0,
            failed_exams: 0,
            skipped_rows: 0,
        }
    }

    /// One processed exam row with its validation findings.
    ///
    /// A record with blocking errors is kept when `skip_errors` is
    /// true (report-only) and discarded when it is false; warnings
    /// never affect the keep/drop decision.
    pub fn record_exam(&mut self, exam: ExamRecord, findings: Vec<Finding>) {
        self.total_rows += 1;
        let has_errors = findings.iter().any(Finding::is_error);
        self.push_findings(findings);

        if has_errors && !self.skip_errors {
            warn!(title = %exam.title, "exam discarded (blocking errors, skip_errors=false)");
            self.failed_exams += 1;
            return;
        }
        if has_errors {
            self.failed_exams += 1;
        } else {
            self.successful_exams += 1;
        }
        self.exams.push(exam);
    }

    /// Findings unrelated to a specific exam row (cross-reference
    /// warnings, question-row issues).
    pub fn push_findings(&mut self, findings: Vec<Finding>) {
        for finding in findings {
            if finding.is_error() {
                self.errors.push(finding);
            } else {
                self.warnings.push(finding);
            }
        }
    }

    /// Linked question map from the cross-referencer. Questions whose
    /// parent exam was discarded are dropped with it.
    pub fn attach_questions(&mut self, questions: HashMap<String, Vec<QuestionRecord>>) {
        let kept: HashSet<&str> = self.exams.iter().map(|e| e.id.as_str()).collect();
        self.questions = questions
            .into_iter()
            .filter(|(exam_id, _)| kept.contains(exam_id.as_str()))
            .collect();
    }

    pub fn add_skipped_rows(&mut self, count: usize) {
        self.skipped_rows += count;
    }

    /// Finalize. Success is recomputed fresh here rather than
    /// carried from earlier partial state.
    pub fn finish(self) -> ImportResult {
        let total_questions = self.questions.values().map(Vec::len).sum();
        let success = self.errors.is_empty();

        info!(
            success,
            exams = self.exams.len(),
            questions = total_questions,
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            "import aggregation complete"
        );

        ImportResult {
            success,
            exams: self.exams,
            questions: self.questions,
            errors: self.errors,
            warnings: self.warnings,
            summary: ImportSummary {
                total_rows: self.total_rows,
                successful_exams: self.successful_exams,
                failed_exams: self.failed_exams,
                total_questions,
                skipped_rows: self.skipped_rows,
            },
        }
    }
}
