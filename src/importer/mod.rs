// ==========================================
// Exam Import Pipeline - Importer Layer
// ==========================================
// Converts user-supplied exam/question datasets
// (Excel, CSV, hierarchical document) into the
// canonical, validated record set.
// Flow: decode -> map -> extract -> link -> validate
// -> aggregate. Stateless; every value is fresh per
// import call.
// ==========================================

pub mod aggregator;
pub mod byte_source;
pub mod cell;
pub mod cross_referencer;
pub mod error;
pub mod field_mapper;
pub mod pipeline;
pub mod record_extractor;
pub mod source_reader;
pub mod template;
pub mod validator;

pub use aggregator::ResultAggregator;
pub use byte_source::{ByteSource, FileByteSource, MemoryByteSource};
pub use cell::{RawCell, RawTable};
pub use cross_referencer::link_questions;
pub use error::{ImportError, Result};
pub use field_mapper::{
    build_field_map, FieldMap, EXAM_FIELD_CANDIDATES, QUESTION_FIELD_CANDIDATES,
};
pub use pipeline::{import_bytes, import_file, import_from_source, parse_format};
pub use record_extractor::{extract_exam, extract_question};
pub use source_reader::{decode_csv, decode_document, decode_excel, DocumentGraph};
pub use template::generate_import_template;
pub use validator::validate_exam;
