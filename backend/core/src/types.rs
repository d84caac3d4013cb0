use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered OCR output for one document: one entry per recognized line or
/// token, in layout scan order. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFragments(Vec<String>);

impl TextFragments {
    pub fn new(fragments: Vec<String>) -> Self {
        Self(fragments)
    }

    /// Split text into fragments, one per non-blank line, trimmed.
    pub fn from_lines(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All fragments joined by a single space.
    pub fn join_spaced(&self) -> String {
        self.0.join(" ")
    }

    /// All fragments joined by line breaks, keeping fragment boundaries visible.
    pub fn join_lines(&self) -> String {
        self.0.join("\n")
    }
}

impl From<Vec<String>> for TextFragments {
    fn from(fragments: Vec<String>) -> Self {
        Self(fragments)
    }
}

impl<S: Into<String>> FromIterator<S> for TextFragments {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Structured fields pulled out of one document's text.
///
/// Every populated field already passed its own validity check; a value that
/// failed validation is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Fragments joined by spaces.
    pub raw_text: String,

    /// Fragments joined by line breaks. Not part of the wire format.
    #[serde(skip)]
    pub raw_text_multiline: String,

    /// Grade or percentage as captured, in the range 0–100. The scale is not
    /// decided here.
    #[serde(rename = "extracted_gpa")]
    pub grade: Option<String>,

    /// Two to four capitalized alphabetic words.
    #[serde(rename = "extracted_name")]
    pub name: Option<String>,

    /// Monetary amount with thousands separators removed; always > 0.
    #[serde(rename = "extracted_balance")]
    pub balance: Option<String>,

    /// Heuristic quality proxy in [0, 1], rounded to two decimals.
    ///
    /// This is not a probability: it blends how many fields were found, how
    /// much text OCR produced and how many expected keywords appear.
    pub confidence_score: f64,
}

impl ExtractedRecord {
    /// Number of structured fields (grade, name, balance) that were populated.
    pub fn fields_found(&self) -> usize {
        [self.grade.is_some(), self.name.is_some(), self.balance.is_some()]
            .into_iter()
            .filter(|found| *found)
            .count()
    }
}

/// A caller-supplied score: either a JSON number or free text such as
/// `"8.5"`, `"85%"` or `"1,000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
}

impl From<f64> for ScoreInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScoreInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScoreInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for ScoreInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Body of an eligibility check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// Grade as returned by extraction, or typed in by the caller.
    #[serde(default)]
    pub extracted_gpa: Option<ScoreInput>,

    /// Language test score supplied alongside the document.
    #[serde(default, alias = "test_score")]
    pub ielts_score: Option<ScoreInput>,
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Grade reason first, then test-score reason.
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_fragments_both_ways() {
        let fragments: TextFragments = ["Name: Asha Rao", "CGPA 9.1"].into_iter().collect();
        assert_eq!(fragments.join_spaced(), "Name: Asha Rao CGPA 9.1");
        assert_eq!(fragments.join_lines(), "Name: Asha Rao\nCGPA 9.1");
    }

    #[test]
    fn from_lines_drops_blank_lines() {
        let fragments = TextFragments::from_lines("  Name: Asha \n\n\t\nCGPA 9.1\r\n");
        assert_eq!(fragments.as_slice(), ["Name: Asha", "CGPA 9.1"]);
    }

    #[test]
    fn record_serializes_wire_names() {
        let record = ExtractedRecord {
            raw_text: "CGPA 9.1".into(),
            raw_text_multiline: "CGPA 9.1".into(),
            grade: Some("9.1".into()),
            name: None,
            balance: None,
            confidence_score: 0.29,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["extracted_gpa"], "9.1");
        assert!(json["extracted_name"].is_null());
        assert!(json.get("raw_text_multiline").is_none());
        assert_eq!(record.fields_found(), 1);
    }

    #[test]
    fn request_accepts_numbers_strings_and_alias() {
        let req: EligibilityRequest =
            serde_json::from_str(r#"{"extracted_gpa": "85%", "test_score": 8}"#).unwrap();
        assert_eq!(req.extracted_gpa, Some(ScoreInput::Text("85%".into())));
        assert_eq!(req.ielts_score, Some(ScoreInput::Number(8.0)));

        let empty: EligibilityRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EligibilityRequest::default());
    }
}
