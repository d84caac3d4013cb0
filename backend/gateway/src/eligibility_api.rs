//! Eligibility check endpoint.

use aegis_core::{EligibilityRequest, EligibilityResult};
use aegis_eligibility::evaluate_request;
use aegis_logging::{EventLogger, VerificationEvent};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Handler for `POST /api/v1/check-eligibility`
pub async fn check_eligibility(
    State(state): State<GatewayState>,
    request: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Result<Json<EligibilityResult>, ApiError> {
    let Json(request) =
        request.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;

    let result = evaluate_request(&request, &state.policy);
    EventLogger::log_event(
        &Uuid::new_v4().to_string(),
        VerificationEvent::EligibilityEvaluated {
            eligible: result.eligible,
            reasons: result.reasons.clone(),
        },
    );
    Ok(Json(result))
}
