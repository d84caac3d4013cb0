use thiserror::Error;

/// Top-level error type for the verification engine.
///
/// The extractor and evaluator never produce these; they come from the
/// collaborators that turn uploaded bytes into text, and from the layers
/// wrapped around them.
#[derive(Debug, Error)]
pub enum AegisError {
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Uploaded file is empty")]
    EmptyDocument,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("OCR engine `{program}` is unavailable: {reason}")]
    EngineUnavailable { program: String, reason: String },

    #[error("failed to render {filename}: {message}")]
    Render { filename: String, message: String },

    #[error("text recognition failed: {0}")]
    Recognition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AegisError {
    /// Whether the error was caused by the uploaded document itself rather
    /// than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::EmptyDocument | Self::InvalidRequest(_)
        )
    }
}
