use serde::{Deserialize, Serialize};

pub const DEFAULT_GPA_THRESHOLD: f64 = 8.0;
pub const DEFAULT_PERCENTAGE_THRESHOLD: f64 = 80.0;
pub const DEFAULT_TEST_SCORE_THRESHOLD: f64 = 8.0;

/// Grades strictly above this value are read as percentages, everything else
/// as grade points.
pub const DEFAULT_SCALE_CUTOFF: f64 = 10.0;

pub const DEFAULT_TEST_LABEL: &str = "IELTS";

/// Thresholds applied by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityPolicy {
    pub gpa_threshold: f64,
    pub percentage_threshold: f64,
    pub test_score_threshold: f64,
    pub scale_cutoff: f64,
    /// Name of the language test, used in reasons ("IELTS score ...").
    pub test_label: String,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            gpa_threshold: DEFAULT_GPA_THRESHOLD,
            percentage_threshold: DEFAULT_PERCENTAGE_THRESHOLD,
            test_score_threshold: DEFAULT_TEST_SCORE_THRESHOLD,
            scale_cutoff: DEFAULT_SCALE_CUTOFF,
            test_label: DEFAULT_TEST_LABEL.to_string(),
        }
    }
}
