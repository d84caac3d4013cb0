//! Log Redaction Layer
//!
//! Scrubs monetary amounts, email addresses and phone numbers from strings
//! prior to logging. Document text and error messages may carry all three.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bRs\.?|\bINR|₹|\$)\s*[0-9][0-9,]*(?:\.[0-9]+)?").unwrap()
});
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}|(?:\+91[-\s]?)?[6-9]\d{4}[-\s]\d{5}",
    )
    .unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = EMAIL_RE.replace_all(input, "[REDACTED_EMAIL]");
    let redacted = AMOUNT_RE.replace_all(&redacted, "[REDACTED_AMOUNT]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_amounts_in_every_currency() {
        let raw = "Balance: Rs. 1,25,000.50, fees ₹ 55000 and $1,200";
        let clean = redact_sensitive_data(raw);
        assert_eq!(
            clean,
            "Balance: [REDACTED_AMOUNT], fees [REDACTED_AMOUNT] and [REDACTED_AMOUNT]"
        );
    }

    #[test]
    fn redacts_contacts() {
        let raw = "Contact priya.raman@example.edu or +1-555-123-4567 or 98765 43210";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("priya.raman@example.edu"));
        assert!(!clean.contains("555-123-4567"));
        assert!(!clean.contains("98765 43210"));
        assert!(clean.contains("[REDACTED_EMAIL]"));
    }

    #[test]
    fn leaves_grades_alone() {
        let raw = "CGPA 9.2 meets requirement (>= 8.0)";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
