use async_trait::async_trait;

use crate::document::{Document, DocumentKind};
use crate::error::AegisError;
use crate::types::TextFragments;

/// A collaborator that turns document bytes into ordered text fragments.
///
/// Implementations own all image/PDF handling; callers only ever see the
/// resulting fragments or an [`AegisError`].
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Short identifier used in logs and health output (e.g., "tesseract").
    fn name(&self) -> &str;

    /// Whether this recognizer can read documents of the given kind.
    fn supports(&self, kind: DocumentKind) -> bool;

    /// Read the document and return its text in layout order.
    async fn recognize(&self, document: &Document) -> Result<TextFragments, AegisError>;
}
