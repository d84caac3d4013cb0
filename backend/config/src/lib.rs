//! `aegis-config`: UnivAegis runtime configuration.
//!
//! Provides:
//! - Typed config schema (gateway, OCR, eligibility, logging)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution and `AEGIS_*` overrides
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, contains_env_var_reference, process_env, resolve_env_vars,
    resolve_env_vars_with, MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use schema::{
    AegisConfig, EligibilityConfig, GatewayConfig, LoggingConfig, OcrConfig, RateLimitConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file, substitute env vars, apply overrides and defaults,
/// then validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors abort the load; warnings are only logged.
pub async fn load_and_prepare(path: &Path) -> Result<AegisConfig> {
    load_and_prepare_with(path, &process_env()).await
}

/// [`load_and_prepare`] against an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<AegisConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config, env)
}

/// Run the post-load pipeline over an already parsed config.
pub fn prepare(raw_config: AegisConfig, env: &HashMap<String, String>) -> Result<AegisConfig> {
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: AegisConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        let summary = report
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        bail!("Invalid configuration: {summary}");
    }

    Ok(config)
}
