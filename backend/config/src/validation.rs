//! Config validation: checks every value after defaults are applied.

use crate::schema::{AegisConfig, EligibilityConfig};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &AegisConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_gateway(config, &mut report);
    validate_ocr(config, &mut report);
    validate_eligibility(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_gateway(config: &AegisConfig, report: &mut ValidationReport) {
    let Some(gw) = &config.gateway else { return };
    if let Some(host) = &gw.host {
        if host.trim().is_empty() {
            report.error("gateway.host", "Host cannot be empty");
        }
    }
    if gw.port == Some(0) {
        report.error("gateway.port", "Port must be > 0");
    }
    if gw.max_upload_bytes == Some(0) {
        report.error("gateway.maxUploadBytes", "maxUploadBytes must be > 0");
    }
    if gw.request_timeout_secs == Some(0) {
        report.error("gateway.requestTimeoutSecs", "requestTimeoutSecs must be > 0");
    }
    if gw.max_concurrent_requests == Some(0) {
        report.error(
            "gateway.maxConcurrentRequests",
            "maxConcurrentRequests must be > 0",
        );
    }
    if let Some(rl) = &gw.rate_limit {
        if rl.max_requests == Some(0) {
            report.error("gateway.rateLimit.maxRequests", "maxRequests must be > 0");
        }
        if rl.window_secs == Some(0) {
            report.error("gateway.rateLimit.windowSecs", "windowSecs must be > 0");
        }
    }
}

fn validate_ocr(config: &AegisConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };
    for (path, value) in [
        ("ocr.tesseractPath", &ocr.tesseract_path),
        ("ocr.pdftoppmPath", &ocr.pdftoppm_path),
        ("ocr.language", &ocr.language),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            report.error(path, "Value cannot be empty");
        }
    }
    if let Some(dpi) = ocr.dpi {
        if dpi == 0 {
            report.error("ocr.dpi", "dpi must be > 0");
        } else if dpi < 150 {
            report.warn(
                "ocr.dpi",
                format!("dpi {dpi} is low; recognition quality will suffer"),
            );
        }
    }
}

fn validate_eligibility(config: &AegisConfig, report: &mut ValidationReport) {
    let Some(el) = &config.eligibility else { return };
    check_threshold(report, "eligibility.gpaThreshold", el.gpa_threshold);
    check_threshold(report, "eligibility.percentageThreshold", el.percentage_threshold);
    check_threshold(report, "eligibility.testScoreThreshold", el.test_score_threshold);

    if let Some(cutoff) = el.scale_cutoff {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            report.error("eligibility.scaleCutoff", "scaleCutoff must be a positive number");
        }
    }
    if el.test_label.as_deref().is_some_and(|l| l.trim().is_empty()) {
        report.error("eligibility.testLabel", "testLabel cannot be empty");
    }
    warn_unreachable(el, report);
}

fn check_threshold(report: &mut ValidationReport, path: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            report.error(path, "Threshold must be a non-negative number");
        }
    }
}

/// Thresholds no grade on their scale can ever reach.
fn warn_unreachable(el: &EligibilityConfig, report: &mut ValidationReport) {
    let cutoff = el.scale_cutoff.unwrap_or(10.0);
    if let Some(gpa) = el.gpa_threshold {
        if gpa > cutoff {
            report.warn(
                "eligibility.gpaThreshold",
                format!("gpaThreshold {gpa} is above scaleCutoff {cutoff}; no grade-point value can pass"),
            );
        }
    }
    if let Some(pct) = el.percentage_threshold {
        if pct > 100.0 {
            report.warn(
                "eligibility.percentageThreshold",
                format!("percentageThreshold {pct} is above 100"),
            );
        }
    }
}

fn validate_logging(config: &AegisConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if logging.level.as_deref().is_some_and(|l| l.trim().is_empty()) {
        report.error("logging.level", "Log level cannot be empty");
    }
    if logging.dir.as_deref().is_some_and(|d| d.trim().is_empty()) {
        report.error("logging.dir", "Log directory cannot be empty; omit it for console only");
    }
}
