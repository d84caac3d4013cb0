//! Verification engine configuration schema.
//!
//! Every field is optional in the file; [`crate::defaults`] fills the gaps
//! after loading.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AegisConfig {
    /// HTTP gateway settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,

    /// OCR tool locations and options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Admission thresholds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Largest accepted upload body, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Requests processed at once across all clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_requests: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    /// Requests allowed per client within one window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// OCR, eligibility, logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdftoppm_path: Option<String>,

    /// Tesseract language pack (e.g. "eng").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// PDF rendering resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
}

/// Overrides for the admission policy. Unset fields keep the built-in
/// thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_score_threshold: Option<f64>,

    /// Grades above this are read as percentages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_cutoff: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "aegis_gateway=debug").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for daily-rolling JSON log files; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Emit JSON on the console instead of human-readable lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
gateway:
  port: 9000
  maxUploadBytes: 1048576
  rateLimit:
    maxRequests: 10
ocr:
  language: eng+hin
eligibility:
  testLabel: TOEFL
  testScoreThreshold: 90
"#;
        let cfg: AegisConfig = serde_yaml::from_str(yaml).unwrap();
        let gateway = cfg.gateway.unwrap();
        assert_eq!(gateway.port, Some(9000));
        assert_eq!(gateway.max_upload_bytes, Some(1_048_576));
        assert_eq!(gateway.rate_limit.unwrap().max_requests, Some(10));
        assert_eq!(cfg.ocr.unwrap().language.as_deref(), Some("eng+hin"));
        let eligibility = cfg.eligibility.unwrap();
        assert_eq!(eligibility.test_label.as_deref(), Some("TOEFL"));
        assert_eq!(eligibility.test_score_threshold, Some(90.0));
        assert!(cfg.logging.is_none());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: AegisConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, AegisConfig::default());
    }
}
