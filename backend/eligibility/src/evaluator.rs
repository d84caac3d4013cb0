use aegis_core::{EligibilityRequest, EligibilityResult, ScoreInput};
use tracing::debug;

use crate::criteria::{grade_criterion, test_score_criterion};
use crate::policy::EligibilityPolicy;

/// Decide eligibility from a grade and a test score.
///
/// Total over its inputs: missing or malformed values fail their criterion
/// and are explained in `reasons`, never reported as errors. Both criteria
/// must pass; the grade reason always precedes the test-score reason.
pub fn evaluate(
    grade: Option<&ScoreInput>,
    test_score: Option<&ScoreInput>,
    policy: &EligibilityPolicy,
) -> EligibilityResult {
    let grade_outcome = grade_criterion(grade, policy);
    let test_outcome = test_score_criterion(test_score, policy);

    let eligible = grade_outcome.passed && test_outcome.passed;
    debug!(
        eligible,
        grade_passed = grade_outcome.passed,
        test_passed = test_outcome.passed,
        "Evaluated eligibility"
    );

    EligibilityResult {
        eligible,
        reasons: vec![grade_outcome.reason, test_outcome.reason],
    }
}

pub fn evaluate_request(request: &EligibilityRequest, policy: &EligibilityPolicy) -> EligibilityResult {
    evaluate(
        request.extracted_gpa.as_ref(),
        request.ielts_score.as_ref(),
        policy,
    )
}
