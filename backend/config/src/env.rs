//! Environment variable substitution and overrides for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${VAR}` escapes to a literal `${VAR}`.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{AegisConfig, GatewayConfig, LoggingConfig, OcrConfig};

/// A reference, optionally preceded by the `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_HOST: &str = "AEGIS_HOST";
pub const ENV_PORT: &str = "AEGIS_PORT";
pub const ENV_LOG_LEVEL: &str = "AEGIS_LOG_LEVEL";
pub const ENV_TESSERACT: &str = "AEGIS_TESSERACT";
pub const ENV_PDFTOPPM: &str = "AEGIS_PDFTOPPM";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. A referenced variable that is unset or
/// empty is an error.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &process_env())
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Check whether a string contains any unescaped env var reference.
pub fn contains_env_var_reference(s: &str) -> bool {
    ENV_VAR_PATTERN
        .captures_iter(s)
        .any(|caps| caps[1].is_empty())
}

/// Apply the `AEGIS_*` overrides on top of the file values.
pub fn apply_env_overrides(
    mut config: AegisConfig,
    env: &HashMap<String, String>,
) -> Result<AegisConfig> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(host) = get(ENV_HOST) {
        config
            .gateway
            .get_or_insert_with(GatewayConfig::default)
            .host = Some(host.to_string());
    }
    if let Some(port) = get(ENV_PORT) {
        let port: u16 = port
            .parse()
            .with_context(|| format!("{ENV_PORT} is not a valid port: {port}"))?;
        config
            .gateway
            .get_or_insert_with(GatewayConfig::default)
            .port = Some(port);
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config
            .logging
            .get_or_insert_with(LoggingConfig::default)
            .level = Some(level.to_string());
    }
    if let Some(path) = get(ENV_TESSERACT) {
        config.ocr.get_or_insert_with(OcrConfig::default).tesseract_path = Some(path.to_string());
    }
    if let Some(path) = get(ENV_PDFTOPPM) {
        config.ocr.get_or_insert_with(OcrConfig::default).pdftoppm_path = Some(path.to_string());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_nested_strings() {
        let value = json!({
            "ocr": { "tesseractPath": "${TESS_HOME}/bin/tesseract", "dpi": 300 },
            "logging": { "dir": "${LOG_ROOT}" }
        });
        let env = env(&[("TESS_HOME", "/opt/tess"), ("LOG_ROOT", "/var/log/aegis")]);
        let out = resolve_env_vars_with(&value, &env).unwrap();
        assert_eq!(out["ocr"]["tesseractPath"], "/opt/tess/bin/tesseract");
        assert_eq!(out["ocr"]["dpi"], 300);
        assert_eq!(out["logging"]["dir"], "/var/log/aegis");
    }

    #[test]
    fn missing_var_reports_path() {
        let value = json!({ "gateway": { "host": "${AEGIS_BIND}" } });
        let err = resolve_env_vars_with(&value, &HashMap::new()).unwrap_err();
        let err = err.downcast::<MissingEnvVarError>().unwrap();
        assert_eq!(err.var_name, "AEGIS_BIND");
        assert_eq!(err.config_path, "gateway.host");
    }

    #[test]
    fn empty_var_counts_as_missing() {
        let value = json!("${EMPTY}");
        assert!(resolve_env_vars_with(&value, &env(&[("EMPTY", "")])).is_err());
    }

    #[test]
    fn escaped_reference_stays_literal() {
        let value = json!("cost $${PRICE} for ${ITEM}");
        let out = resolve_env_vars_with(&value, &env(&[("ITEM", "scan")])).unwrap();
        assert_eq!(out, "cost ${PRICE} for scan");
        assert!(!contains_env_var_reference("$${PRICE}"));
        assert!(contains_env_var_reference("${PRICE}"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = AegisConfig {
            gateway: Some(GatewayConfig {
                port: Some(8000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let env = env(&[
            (ENV_PORT, "9001"),
            (ENV_HOST, "127.0.0.1"),
            (ENV_TESSERACT, "/usr/local/bin/tesseract"),
            (ENV_LOG_LEVEL, " "),
        ]);
        let config = apply_env_overrides(config, &env).unwrap();
        let gateway = config.gateway.unwrap();
        assert_eq!(gateway.port, Some(9001));
        assert_eq!(gateway.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(
            config.ocr.unwrap().tesseract_path.as_deref(),
            Some("/usr/local/bin/tesseract")
        );
        assert!(config.logging.is_none());
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let err = apply_env_overrides(AegisConfig::default(), &env(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("AEGIS_PORT"));
    }
}
