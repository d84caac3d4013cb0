pub mod document;
pub mod error;
pub mod traits;
pub mod types;

pub use document::{Document, DocumentKind, SUPPORTED_EXTENSIONS};
pub use error::AegisError;
pub use traits::TextRecognizer;
pub use types::{
    EligibilityRequest, EligibilityResult, ExtractedRecord, ScoreInput, TextFragments,
};
