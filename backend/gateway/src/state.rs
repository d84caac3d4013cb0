use std::sync::Arc;

use aegis_core::TextRecognizer;
use aegis_eligibility::EligibilityPolicy;
use chrono::{DateTime, Utc};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    /// Turns uploaded bytes into text fragments.
    pub reader: Arc<dyn TextRecognizer>,
    pub policy: Arc<EligibilityPolicy>,
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(reader: Arc<dyn TextRecognizer>, policy: EligibilityPolicy) -> Self {
        Self {
            reader,
            policy: Arc::new(policy),
            started_at: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
