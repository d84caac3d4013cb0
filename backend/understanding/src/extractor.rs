//! Field extraction over OCR fragments.

use aegis_core::{ExtractedRecord, TextFragments};
use tracing::debug;

use crate::balance::extract_balance;
use crate::confidence::confidence_score;
use crate::grade::extract_grade;
use crate::name::extract_name;

/// Pull grade, name and balance out of a document's text and score the pass.
///
/// Never fails: a field that cannot be found, or whose candidate fails
/// validation, is left as `None`. The same fragments always produce the same
/// record.
pub fn extract_fields(fragments: &TextFragments) -> ExtractedRecord {
    let raw_text = fragments.join_spaced();
    let raw_text_multiline = fragments.join_lines();

    let mut record = ExtractedRecord {
        grade: extract_grade(&raw_text),
        name: extract_name(&raw_text_multiline),
        balance: extract_balance(&raw_text),
        raw_text,
        raw_text_multiline,
        confidence_score: 0.0,
    };
    record.confidence_score = confidence_score(&record.raw_text, record.fields_found());

    debug!(
        fragments = fragments.len(),
        fields_found = record.fields_found(),
        confidence = record.confidence_score,
        "Extracted document fields"
    );
    record
}
