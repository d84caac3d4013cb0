//! Grade / percentage extraction.
//!
//! Labels are tried from most to least specific, so a document carrying both a
//! CGPA and a generic "Total" resolves to the CGPA.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;

use crate::cascade::Cascade;

/// Values outside this range are never stored as a grade.
pub const GRADE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

static GRADE_CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        "grade",
        &[
            ("cgpa", r"(?i)CGPA[:\s\-]*(\d+\.?\d*)"),
            ("cgpa_parenthesized", r"(?i)\(CGPA\)[:\s\-]*(\d+\.?\d*)"),
            ("cgpa_dotted", r"(?i)C\.?G\.?P\.?A\.?[:\s\-]*(\d+\.?\d*)"),
            ("gpa", r"(?i)GPA[:\s\-]*(\d+\.?\d*)"),
            ("gpa_dotted", r"(?i)G\.?P\.?A\.?[:\s\-]*(\d+\.?\d*)"),
            ("grade", r"(?i)Grade[:\s\-]*(\d+\.?\d*)"),
            ("final_grade", r"(?i)Final\s+Grade[:\s\-]*(\d+\.?\d*)"),
            ("percentage", r"(?i)Percentage[:\s\-]*(\d+\.?\d*)"),
            ("percent_sign", r"(\d{1,3}\.?\d*)\s*%"),
            ("percent", r"(?i)Percent[:\s\-]*(\d+\.?\d*)"),
            ("score", r"(?i)Score[:\s\-]*(\d+\.?\d*)"),
            ("total", r"(?i)Total[:\s\-]*(\d+\.?\d*)"),
        ],
    )
});

/// The grade cascade, for inspection.
pub fn grade_cascade() -> &'static Cascade {
    &GRADE_CASCADE
}

/// Find the grade in single-line document text.
///
/// Returns the captured digits verbatim; whether they are a grade point or a
/// percentage is left to the caller.
pub fn extract_grade(raw_text: &str) -> Option<String> {
    GRADE_CASCADE
        .first_accepted(raw_text, |captured| {
            let value: f64 = captured.parse().ok()?;
            GRADE_RANGE.contains(&value).then(|| captured.to_string())
        })
        .map(|hit| hit.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cgpa_beats_total() {
        let text = "Statement of Marks CGPA: 9.2 Fee Receipt Total: 55000";
        assert_eq!(extract_grade(text).as_deref(), Some("9.2"));
    }

    #[test]
    fn specific_label_wins_even_when_generic_comes_first() {
        let text = "Score: 72 Final GPA - 3.8";
        assert_eq!(extract_grade(text).as_deref(), Some("3.8"));
    }

    #[test]
    fn dotted_abbreviation() {
        assert_eq!(extract_grade("C.G.P.A. 8.75").as_deref(), Some("8.75"));
    }

    #[test]
    fn case_insensitive_label() {
        assert_eq!(extract_grade("cgpa:7.4 awarded").as_deref(), Some("7.4"));
    }

    #[test]
    fn bare_percentage() {
        assert_eq!(extract_grade("Aggregate 86.5 % First Class").as_deref(), Some("86.5"));
    }

    #[test]
    fn out_of_range_moves_to_next_rule() {
        // "Score 450" is rejected; "Total 78" is the next rule's candidate.
        assert_eq!(extract_grade("Score: 450 Total: 78").as_deref(), Some("78"));
    }

    #[test]
    fn out_of_range_only_is_none() {
        assert_eq!(extract_grade("Total: 55000"), None);
    }

    #[test]
    fn keeps_captured_text_verbatim() {
        assert_eq!(extract_grade("GPA: 9.").as_deref(), Some("9."));
    }

    #[test]
    fn no_label_no_grade() {
        assert_eq!(extract_grade("Bonafide certificate issued on request"), None);
    }

    #[test]
    fn cascade_order_is_most_specific_first() {
        let labels: Vec<_> = grade_cascade().labels().collect();
        assert_eq!(labels.first(), Some(&"cgpa"));
        assert_eq!(labels.last(), Some(&"total"));
        assert_eq!(labels.len(), 12);
    }
}
