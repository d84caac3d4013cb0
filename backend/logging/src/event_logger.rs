//! Verification Event Logger
//!
//! One structured event per extraction or eligibility decision, emitted as a
//! JSON line under the `verification_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

pub const EVENT_TARGET: &str = "verification_events";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerificationEvent {
    DocumentExtracted {
        filename: String,
        kind: String,
        fields_found: usize,
        confidence_score: f64,
    },
    EligibilityEvaluated {
        eligible: bool,
        reasons: Vec<String>,
    },
    ProcessingFailed {
        filename: Option<String>,
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: VerificationEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact free text in the event, log it, and hand back the logged entry.
    pub fn log_event(request_id: &str, mut event: VerificationEvent) -> EventLogEntry {
        match &mut event {
            VerificationEvent::DocumentExtracted { filename, .. } => {
                *filename = redact_sensitive_data(filename);
            }
            VerificationEvent::EligibilityEvaluated { reasons, .. } => {
                for reason in reasons.iter_mut() {
                    *reason = redact_sensitive_data(reason);
                }
            }
            VerificationEvent::ProcessingFailed { filename, error } => {
                if let Some(name) = filename {
                    *name = redact_sensitive_data(name);
                }
                *error = redact_sensitive_data(error);
            }
        }

        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: EVENT_TARGET, event = %json, "Verification event"),
            Err(e) => warn!(target: EVENT_TARGET, error = %e, "Failed to serialize verification event"),
        }
        entry
    }
}
