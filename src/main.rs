// ==========================================
// Exam Import Pipeline - Diagnostic CLI
// ==========================================
// Imports one file and logs the outcome. The real
// platform drives the library through its UI; this
// binary exists for local inspection of user files.
// Usage: exam-importer <file> [excel|csv|json]
// ==========================================

use exam_importer::{import_file, logging, parse_format, ImportFormat, ImportOptions};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        error!("usage: exam-importer <file> [excel|csv|json]");
        return ExitCode::FAILURE;
    };

    let format = match args.next() {
        Some(name) => match parse_format(&name) {
            Ok(format) => format,
            Err(e) => {
                error!(error = %e, "cannot import");
                return ExitCode::FAILURE;
            }
        },
        None => guess_format(&path),
    };

    let options = ImportOptions::new(format);
    let result = import_file(&path, &options).await;

    for finding in result.errors.iter().chain(result.warnings.iter()) {
        match finding.is_error() {
            true => error!(row = ?finding.row, field = ?finding.field, "{}", finding.message),
            false => warn!(row = ?finding.row, field = ?finding.field, "{}", finding.message),
        }
    }

    info!(
        success = result.success,
        exams = result.summary.successful_exams,
        failed = result.summary.failed_exams,
        questions = result.summary.total_questions,
        skipped = result.summary.skipped_rows,
        "import finished"
    );

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn guess_format(path: &str) -> ImportFormat {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "xlsx" | "xls" => ImportFormat::Excel,
        "json" => ImportFormat::Json,
        _ => ImportFormat::Csv,
    }
}
