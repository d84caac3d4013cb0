//! The two independent criteria. Each always yields exactly one reason.

use aegis_core::ScoreInput;

use crate::policy::EligibilityPolicy;

/// Which scale a grade was judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeScale {
    GradePoint,
    Percentage,
}

impl GradeScale {
    /// Values above the cutoff are percentages. A grade-point scale wider than
    /// the cutoff (e.g. 0–20) is misread as a percentage.
    pub fn classify(value: f64, cutoff: f64) -> Self {
        if value > cutoff {
            Self::Percentage
        } else {
            Self::GradePoint
        }
    }
}

/// Pass/fail of one criterion and the sentence explaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionOutcome {
    pub passed: bool,
    pub reason: String,
}

impl CriterionOutcome {
    fn pass(reason: String) -> Self {
        Self { passed: true, reason }
    }

    fn fail(reason: String) -> Self {
        Self { passed: false, reason }
    }
}

/// Normalize a grade: numbers pass through; text is trimmed and stripped of
/// `%` and `,` before parsing.
pub fn parse_score(input: &ScoreInput) -> Option<f64> {
    match input {
        ScoreInput::Number(n) => Some(*n),
        ScoreInput::Text(s) => s.trim().replace(&['%', ','][..], "").trim().parse().ok(),
    }
}

/// Test scores are coerced without stripping any characters.
fn parse_test_score(input: &ScoreInput) -> Option<f64> {
    match input {
        ScoreInput::Number(n) => Some(*n),
        ScoreInput::Text(s) => s.trim().parse().ok(),
    }
}

pub fn grade_criterion(grade: Option<&ScoreInput>, policy: &EligibilityPolicy) -> CriterionOutcome {
    let grade = match grade {
        None => return CriterionOutcome::fail("GPA/Percentage not found in document".to_string()),
        Some(ScoreInput::Text(s)) if s.is_empty() => {
            return CriterionOutcome::fail("GPA/Percentage not found in document".to_string())
        }
        Some(grade) => grade,
    };

    let Some(value) = parse_score(grade) else {
        return CriterionOutcome::fail("Unable to parse GPA/Percentage value".to_string());
    };

    let shown = format_number(value);
    match GradeScale::classify(value, policy.scale_cutoff) {
        GradeScale::Percentage => {
            let threshold = format_number(policy.percentage_threshold);
            if value >= policy.percentage_threshold {
                CriterionOutcome::pass(format!(
                    "Percentage {shown}% meets requirement (>= {threshold}%)"
                ))
            } else {
                CriterionOutcome::fail(format!("Percentage {shown}% is below required {threshold}%"))
            }
        }
        GradeScale::GradePoint => {
            let threshold = format_number(policy.gpa_threshold);
            if value >= policy.gpa_threshold {
                CriterionOutcome::pass(format!("GPA {shown} meets requirement (>= {threshold})"))
            } else {
                CriterionOutcome::fail(format!("GPA {shown} is below required {threshold}"))
            }
        }
    }
}

pub fn test_score_criterion(
    score: Option<&ScoreInput>,
    policy: &EligibilityPolicy,
) -> CriterionOutcome {
    let label = &policy.test_label;
    let Some(score) = score else {
        return CriterionOutcome::fail(format!("{label} score not provided"));
    };
    let Some(value) = parse_test_score(score) else {
        return CriterionOutcome::fail(format!("Invalid {label} score format"));
    };

    let shown = format_number(value);
    let threshold = format_number(policy.test_score_threshold);
    if value >= policy.test_score_threshold {
        CriterionOutcome::pass(format!(
            "{label} score {shown} meets requirement (>= {threshold})"
        ))
    } else {
        CriterionOutcome::fail(format!("{label} score {shown} is below required {threshold}"))
    }
}

/// Render a float the way Python's `repr` does: `85.0`, `9.2`, `1e-05`,
/// `1.5e+16`.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return format!("{value:.1}");
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
