//! Admissions eligibility: a grade criterion and a test-score criterion,
//! combined with logical AND.

pub mod criteria;
pub mod evaluator;
pub mod policy;

pub use criteria::{grade_criterion, parse_score, test_score_criterion, CriterionOutcome, GradeScale};
pub use evaluator::{evaluate, evaluate_request};
pub use policy::EligibilityPolicy;
