//! Student name extraction.
//!
//! Runs against the line-joined text so a name run never spills into the next
//! OCR fragment; the label itself may sit on the line before the name.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;

use crate::cascade::Cascade;

/// Words that end a name run when OCR glues the name to institutional text.
pub const STOP_WORDS: &[&str] = &[
    "University",
    "College",
    "Institute",
    "School",
    "Department",
    "Faculty",
    "Of",
    "The",
    "And",
    "CGPA",
    "GPA",
    "Grade",
];

/// Accepted number of words in a cleaned name.
pub const NAME_WORDS: RangeInclusive<usize> = 2..=4;

/// Two to four letter words separated by spaces or tabs on one line.
const NAME_RUN: &str = r"([A-Z][a-zA-Z]+(?:[^\S\r\n]+[A-Z][a-zA-Z]+){1,3})";

static NAME_CASCADE: Lazy<Cascade> = Lazy::new(|| {
    Cascade::new(
        "name",
        &[
            ("name", format!(r"(?i)(?:Student\s+)?Name[:\s]+{NAME_RUN}")),
            (
                "name_of_student",
                format!(r"(?i)Name\s+of\s+(?:the\s+)?Student[:\s]+{NAME_RUN}"),
            ),
            ("candidate", format!(r"(?i)Candidate[:\s]+{NAME_RUN}")),
        ],
    )
});

pub fn name_cascade() -> &'static Cascade {
    &NAME_CASCADE
}

/// Find the student name in line-joined document text.
pub fn extract_name(raw_text_multiline: &str) -> Option<String> {
    NAME_CASCADE
        .first_accepted(raw_text_multiline, clean_name)
        .map(|hit| hit.value)
}

/// Trim a captured run down to the words that look like a personal name.
///
/// Stops at the first stop word, skips words that are not capitalized or not
/// purely alphabetic, and accepts the result only with 2–4 words.
pub fn clean_name(run: &str) -> Option<String> {
    let mut words = Vec::new();
    for word in run.split_whitespace() {
        if STOP_WORDS.contains(&word) {
            break;
        }
        if is_name_word(word) {
            words.push(word);
        }
    }
    NAME_WORDS.contains(&words.len()).then(|| words.join(" "))
}

fn is_name_word(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase) && word.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_truncates_run() {
        let text = "Name: John Michael Smith University of Technology";
        assert_eq!(extract_name(text).as_deref(), Some("John Michael Smith"));
    }

    #[test]
    fn single_word_is_rejected() {
        assert_eq!(extract_name("Name: Madonna"), None);
    }

    #[test]
    fn five_word_run_is_rejected() {
        assert_eq!(clean_name("Anna Maria Louisa Clara Beatrix"), None);
    }

    #[test]
    fn long_run_is_cut_at_four_words() {
        // The run pattern stops after four words, so a fifth never reaches cleaning.
        let text = "Name: Anna Maria Louisa Clara Beatrix";
        assert_eq!(extract_name(text).as_deref(), Some("Anna Maria Louisa Clara"));
    }

    #[test]
    fn name_of_student_label() {
        // The plain "Name" rule captures "of Student", which cleans to one word,
        // so the cascade falls through to the dedicated rule.
        let text = "Name of the Student: Priya Raman";
        assert_eq!(extract_name(text).as_deref(), Some("Priya Raman"));
    }

    #[test]
    fn candidate_label() {
        let text = "Roll No 4411\nCandidate: Arjun Kumar Das";
        assert_eq!(extract_name(text).as_deref(), Some("Arjun Kumar Das"));
    }

    #[test]
    fn lowercase_words_are_skipped_not_stopping() {
        assert_eq!(clean_name("Maria de Souza").as_deref(), Some("Maria Souza"));
    }

    #[test]
    fn stop_words_are_case_sensitive() {
        // "of" is skipped for being lowercase; only "Of" would stop the run.
        assert_eq!(clean_name("Ravi of Kumar").as_deref(), Some("Ravi Kumar"));
        assert_eq!(clean_name("Ravi Of Kumar"), None);
    }

    #[test]
    fn label_may_precede_name_on_previous_line() {
        let text = "Name:\nAsha Rao\nRegistration Number 20-11";
        assert_eq!(extract_name(text).as_deref(), Some("Asha Rao"));
    }

    #[test]
    fn run_does_not_cross_line_breaks() {
        let text = "Student Name: Asha Rao\nRegistration Number";
        assert_eq!(extract_name(text).as_deref(), Some("Asha Rao"));
    }

    #[test]
    fn no_label_no_name() {
        assert_eq!(extract_name("Asha Rao\nCGPA 9.1"), None);
    }
}
