//! Resolved gateway settings and the config-to-domain conversions the
//! gateway and CLI share.

use std::time::Duration;

use aegis_config::defaults::{
    DEFAULT_HOST, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
    DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use aegis_config::AegisConfig;
use aegis_eligibility::EligibilityPolicy;
use aegis_understanding::OcrSettings;

/// Listener, limits and timeouts for one gateway instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        }
    }
}

impl GatewaySettings {
    /// Read the `gateway` section; anything unset keeps its default.
    pub fn from_config(config: &AegisConfig) -> Self {
        let mut settings = Self::default();
        let Some(gw) = &config.gateway else {
            return settings;
        };
        if let Some(host) = &gw.host {
            settings.host = host.clone();
        }
        if let Some(port) = gw.port {
            settings.port = port;
        }
        if let Some(bytes) = gw.max_upload_bytes {
            settings.max_upload_bytes = bytes;
        }
        if let Some(secs) = gw.request_timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = gw.max_concurrent_requests {
            settings.max_concurrent_requests = max;
        }
        if let Some(rl) = &gw.rate_limit {
            if let Some(max) = rl.max_requests {
                settings.rate_limit_max_requests = max;
            }
            if let Some(secs) = rl.window_secs {
                settings.rate_limit_window = Duration::from_secs(secs);
            }
        }
        settings
    }
}

/// Admission policy with the `eligibility` section applied over the built-in
/// thresholds.
pub fn policy_from_config(config: &AegisConfig) -> EligibilityPolicy {
    let mut policy = EligibilityPolicy::default();
    let Some(el) = &config.eligibility else {
        return policy;
    };
    if let Some(v) = el.gpa_threshold {
        policy.gpa_threshold = v;
    }
    if let Some(v) = el.percentage_threshold {
        policy.percentage_threshold = v;
    }
    if let Some(v) = el.test_score_threshold {
        policy.test_score_threshold = v;
    }
    if let Some(v) = el.scale_cutoff {
        policy.scale_cutoff = v;
    }
    if let Some(label) = &el.test_label {
        policy.test_label = label.clone();
    }
    policy
}

pub fn ocr_settings_from_config(config: &AegisConfig) -> OcrSettings {
    let mut settings = OcrSettings::default();
    let Some(ocr) = &config.ocr else {
        return settings;
    };
    if let Some(path) = &ocr.tesseract_path {
        settings.tesseract_path = path.clone();
    }
    if let Some(path) = &ocr.pdftoppm_path {
        settings.pdftoppm_path = path.clone();
    }
    if let Some(language) = &ocr.language {
        settings.language = language.clone();
    }
    if let Some(dpi) = ocr.dpi {
        settings.dpi = dpi;
    }
    settings
}
