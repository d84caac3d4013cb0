//! `aegis check`

use std::path::Path;

use aegis_core::{EligibilityResult, ScoreInput};
use aegis_eligibility::evaluate;
use aegis_gateway::policy_from_config;
use anyhow::Result;

use crate::settings;
use crate::terminal_output::{paint, GREEN, RED};

pub async fn run(
    config_path: Option<&Path>,
    grade: Option<String>,
    test_score: Option<String>,
) -> Result<()> {
    let config = settings::load(config_path).await?;
    settings::init_logging(&config, true)?;

    let policy = policy_from_config(&config);
    let grade = grade.map(ScoreInput::from);
    let test_score = test_score.map(ScoreInput::from);
    let result = evaluate(grade.as_ref(), test_score.as_ref(), &policy);

    println!("{}", render(&result));
    Ok(())
}

fn render(result: &EligibilityResult) -> String {
    let verdict = if result.eligible {
        paint("ELIGIBLE", GREEN)
    } else {
        paint("NOT ELIGIBLE", RED)
    };
    let mut out = verdict;
    for reason in &result.reasons {
        out.push_str("\n  - ");
        out.push_str(reason);
    }
    out
}
