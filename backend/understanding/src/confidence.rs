//! Extraction confidence heuristic.
//!
//! The score is a quality proxy for one extraction pass, not a statistical
//! probability. It blends three signals, each normalized to [0, 1]:
//!
//! | signal             | weight | measure                                   |
//! |--------------------|--------|-------------------------------------------|
//! | extraction success | 0.6    | populated fields / 3                      |
//! | text volume        | 0.2    | `min(chars / 500, 1)`                     |
//! | keyword presence   | 0.2    | `min(keywords found / 6, 1)`              |
//!
//! The sum is rounded to two decimals. It only reaches 1.0 when all three
//! signals saturate together.

/// Fields the extractor attempts (grade, name, balance).
pub const EXTRACTABLE_FIELDS: usize = 3;

pub const EXTRACTION_WEIGHT: f64 = 0.6;
pub const TEXT_VOLUME_WEIGHT: f64 = 0.2;
pub const KEYWORD_WEIGHT: f64 = 0.2;

/// Character count at which the text-volume signal saturates.
pub const TEXT_VOLUME_SATURATION: usize = 500;

/// Words expected on an academic document, matched case-insensitively as
/// substrings.
pub const KEYWORDS: &[&str] = &["Name", "GPA", "CGPA", "Grade", "Student", "University"];

/// The three normalized inputs of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceSignals {
    pub extraction_success: f64,
    pub text_volume: f64,
    pub keyword_presence: f64,
}

impl ConfidenceSignals {
    pub fn measure(raw_text: &str, fields_found: usize) -> Self {
        let lowered = raw_text.to_lowercase();
        let keywords_found = KEYWORDS
            .iter()
            .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
            .count();

        Self {
            extraction_success: fields_found.min(EXTRACTABLE_FIELDS) as f64
                / EXTRACTABLE_FIELDS as f64,
            text_volume: (raw_text.chars().count() as f64 / TEXT_VOLUME_SATURATION as f64).min(1.0),
            keyword_presence: (keywords_found as f64 / KEYWORDS.len() as f64).min(1.0),
        }
    }

    /// Weighted sum rounded to two decimals.
    pub fn score(&self) -> f64 {
        let total = self.extraction_success * EXTRACTION_WEIGHT
            + self.text_volume * TEXT_VOLUME_WEIGHT
            + self.keyword_presence * KEYWORD_WEIGHT;
        round2(total)
    }
}

/// Confidence score for text that yielded `fields_found` structured fields.
pub fn confidence_score(raw_text: &str, fields_found: usize) -> f64 {
    ConfidenceSignals::measure(raw_text, fields_found).score()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
