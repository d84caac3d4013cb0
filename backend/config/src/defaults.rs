//! Config defaults: fills every unset gateway, OCR and logging value.
//!
//! Eligibility thresholds are left alone; unset fields there fall back to the
//! evaluator's built-in policy.

use crate::schema::{AegisConfig, GatewayConfig, LoggingConfig, OcrConfig, RateLimitConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// 20 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// OCR of a multi-megabyte scan can take a while.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 32;
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 60;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

pub const DEFAULT_TESSERACT_PATH: &str = "tesseract";
pub const DEFAULT_PDFTOPPM_PATH: &str = "pdftoppm";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_OCR_DPI: u32 = 300;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: AegisConfig) -> AegisConfig {
    let config = apply_gateway_defaults(config);
    let config = apply_ocr_defaults(config);
    apply_logging_defaults(config)
}

fn apply_gateway_defaults(mut config: AegisConfig) -> AegisConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    gateway.host.get_or_insert_with(|| DEFAULT_HOST.to_string());
    gateway.port.get_or_insert(DEFAULT_PORT);
    gateway.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    gateway
        .request_timeout_secs
        .get_or_insert(DEFAULT_REQUEST_TIMEOUT_SECS);
    gateway
        .max_concurrent_requests
        .get_or_insert(DEFAULT_MAX_CONCURRENT_REQUESTS);

    let rate_limit = gateway.rate_limit.get_or_insert_with(RateLimitConfig::default);
    rate_limit
        .max_requests
        .get_or_insert(DEFAULT_RATE_LIMIT_MAX_REQUESTS);
    rate_limit
        .window_secs
        .get_or_insert(DEFAULT_RATE_LIMIT_WINDOW_SECS);
    config
}

fn apply_ocr_defaults(mut config: AegisConfig) -> AegisConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.tesseract_path
        .get_or_insert_with(|| DEFAULT_TESSERACT_PATH.to_string());
    ocr.pdftoppm_path
        .get_or_insert_with(|| DEFAULT_PDFTOPPM_PATH.to_string());
    ocr.language
        .get_or_insert_with(|| DEFAULT_OCR_LANGUAGE.to_string());
    ocr.dpi.get_or_insert(DEFAULT_OCR_DPI);
    config
}

fn apply_logging_defaults(mut config: AegisConfig) -> AegisConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}
