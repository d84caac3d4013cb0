//! Document understanding for admissions verification.
//!
//! Turns uploaded documents into text (OCR, PDF rendering, plain text) and
//! pulls grade, name and balance fields out of that text.

pub mod balance;
pub mod cascade;
pub mod confidence;
pub mod extractor;
pub mod grade;
pub mod name;
pub mod ocr;
pub mod plain_text;
pub mod reader;

pub use cascade::{Accepted, Cascade};
pub use confidence::{confidence_score, ConfidenceSignals};
pub use extractor::extract_fields;
pub use ocr::{engine_version, OcrSettings, TesseractRecognizer};
pub use plain_text::PlainTextReader;
pub use reader::{process_document, DocumentReader};
