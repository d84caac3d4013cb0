//! Plain-text documents: already text, so no OCR is involved.

use aegis_core::document::extension_of;
use aegis_core::{AegisError, Document, DocumentKind, TextFragments, TextRecognizer};
use async_trait::async_trait;
use tracing::debug;

/// Splits a UTF-8 (lossily decoded) text file into line fragments.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

#[async_trait]
impl TextRecognizer for PlainTextReader {
    fn name(&self) -> &str {
        "plain_text"
    }

    fn supports(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::PlainText
    }

    async fn recognize(&self, document: &Document) -> Result<TextFragments, AegisError> {
        if !self.supports(document.kind) {
            return Err(AegisError::UnsupportedFormat {
                extension: extension_of(&document.filename),
            });
        }
        let text = String::from_utf8_lossy(&document.bytes);
        let fragments = TextFragments::from_lines(&text);
        debug!(fragments = fragments.len(), "Read plain-text document");
        Ok(fragments)
    }
}
