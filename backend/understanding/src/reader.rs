//! Collaborator selection: routes each document to the recognizer that can
//! read it, then hands the text to the extractor.

use std::sync::Arc;

use aegis_core::document::extension_of;
use aegis_core::{AegisError, Document, DocumentKind, ExtractedRecord, TextFragments, TextRecognizer};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::extractor::extract_fields;
use crate::ocr::{OcrSettings, TesseractRecognizer};
use crate::plain_text::PlainTextReader;

/// Ordered set of recognizers; the first one supporting a document kind wins.
#[derive(Clone, Default)]
pub struct DocumentReader {
    recognizers: Vec<Arc<dyn TextRecognizer>>,
}

impl DocumentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard set: tesseract for PDFs and images, direct reading for text.
    pub fn from_settings(settings: OcrSettings) -> Self {
        Self::new()
            .with_recognizer(Arc::new(TesseractRecognizer::new(settings)))
            .with_recognizer(Arc::new(PlainTextReader))
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    pub fn recognizer_for(&self, kind: DocumentKind) -> Option<&Arc<dyn TextRecognizer>> {
        self.recognizers.iter().find(|r| r.supports(kind))
    }

    /// Names of the registered recognizers, in priority order.
    pub fn names(&self) -> Vec<String> {
        self.recognizers.iter().map(|r| r.name().to_string()).collect()
    }
}

#[async_trait]
impl TextRecognizer for DocumentReader {
    fn name(&self) -> &str {
        "document_reader"
    }

    fn supports(&self, kind: DocumentKind) -> bool {
        self.recognizer_for(kind).is_some()
    }

    async fn recognize(&self, document: &Document) -> Result<TextFragments, AegisError> {
        let recognizer = self.recognizer_for(document.kind).ok_or_else(|| {
            AegisError::UnsupportedFormat {
                extension: extension_of(&document.filename),
            }
        })?;
        debug!(
            kind = document.kind.as_str(),
            recognizer = recognizer.name(),
            "Dispatching document"
        );
        recognizer.recognize(document).await
    }
}

/// Read a document with `recognizer` and extract its fields.
pub async fn process_document(
    recognizer: &dyn TextRecognizer,
    document: &Document,
) -> Result<ExtractedRecord, AegisError> {
    let fragments = recognizer.recognize(document).await?;
    let record = extract_fields(&fragments);
    info!(
        kind = document.kind.as_str(),
        bytes = document.len(),
        fields_found = record.fields_found(),
        confidence = record.confidence_score,
        "Processed document"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_covers_every_kind() {
        let reader = DocumentReader::from_settings(OcrSettings::default());
        assert_eq!(reader.names(), ["tesseract", "plain_text"]);
        for kind in [DocumentKind::Pdf, DocumentKind::Image, DocumentKind::PlainText] {
            assert!(reader.supports(kind), "{kind:?}");
        }
        assert_eq!(
            reader.recognizer_for(DocumentKind::PlainText).map(|r| r.name().to_string()),
            Some("plain_text".to_string())
        );
    }

    #[tokio::test]
    async fn empty_reader_rejects_documents() {
        let document = Document::new("marks.txt", b"GPA 3.9".to_vec()).unwrap();
        let err = DocumentReader::new().recognize(&document).await.unwrap_err();
        assert!(matches!(err, AegisError::UnsupportedFormat { ref extension } if extension == "txt"));
    }

    #[tokio::test]
    async fn processes_text_document_end_to_end() {
        let reader = DocumentReader::new().with_recognizer(Arc::new(PlainTextReader));
        let document = Document::new(
            "statement.txt",
            "Candidate: Arjun Kumar Das\nPercentage: 86.4\nAvailable Balance: INR 7,10,000\n"
                .as_bytes()
                .to_vec(),
        )
        .unwrap();
        let record = process_document(&reader, &document).await.unwrap();
        assert_eq!(record.name.as_deref(), Some("Arjun Kumar Das"));
        assert_eq!(record.grade.as_deref(), Some("86.4"));
        assert_eq!(record.balance.as_deref(), Some("710000"));
    }
}
