//! Uploaded documents and the file-type sniffing used to pick a reader.

use serde::{Deserialize, Serialize};

use crate::error::AegisError;

/// File extensions accepted for upload, in the order they are reported to
/// callers.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["pdf", "jpg", "jpeg", "png", "bmp", "tiff", "webp", "txt"];

/// Broad document category; decides which collaborator reads the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Rendered to a raster (first page only) before OCR.
    Pdf,
    /// Fed to OCR directly.
    Image,
    /// Already text; split into lines without OCR.
    PlainText,
}

impl DocumentKind {
    /// Map a lowercase extension (no dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" | "png" | "bmp" | "tiff" | "webp" => Some(Self::Image),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Detect the kind from an uploaded file name.
    ///
    /// The extension is whatever follows the last `.`; a name without a dot
    /// is treated as its own extension and rejected.
    pub fn from_filename(filename: &str) -> Result<Self, AegisError> {
        let extension = extension_of(filename);
        Self::from_extension(&extension).ok_or(AegisError::UnsupportedFormat { extension })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::PlainText => "plain_text",
        }
    }
}

/// Lowercased text after the last `.` of a file name.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// A document received from a caller, already classified.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Classify and wrap uploaded bytes.
    ///
    /// The extension is checked before the payload so an empty file with an
    /// unsupported name reports the format problem.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AegisError> {
        let filename = filename.into();
        let kind = DocumentKind::from_filename(&filename)?;
        if bytes.is_empty() {
            return Err(AegisError::EmptyDocument);
        }
        Ok(Self { filename, kind, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_case_insensitively() {
        assert_eq!(DocumentKind::from_filename("Transcript.PDF").unwrap(), DocumentKind::Pdf);
    }

    #[test]
    fn detects_images() {
        for name in ["scan.jpg", "scan.jpeg", "scan.png", "scan.bmp", "scan.tiff", "scan.webp"] {
            assert_eq!(DocumentKind::from_filename(name).unwrap(), DocumentKind::Image, "{name}");
        }
    }

    #[test]
    fn uses_last_extension() {
        assert_eq!(
            DocumentKind::from_filename("marks.pdf.png").unwrap(),
            DocumentKind::Image
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = DocumentKind::from_filename("letter.docx").unwrap_err();
        assert!(matches!(err, AegisError::UnsupportedFormat { ref extension } if extension == "docx"));
    }

    #[test]
    fn rejects_name_without_extension() {
        assert!(DocumentKind::from_filename("README").is_err());
    }

    #[test]
    fn empty_payload_is_rejected_after_format_check() {
        assert!(matches!(
            Document::new("scan.png", Vec::new()),
            Err(AegisError::EmptyDocument)
        ));
        assert!(matches!(
            Document::new("scan.exe", Vec::new()),
            Err(AegisError::UnsupportedFormat { .. })
        ));
    }
}
