//! Config loading and logger setup shared by every subcommand.

use std::path::{Path, PathBuf};

use aegis_config::{config_dir, config_file_path, load_and_prepare, AegisConfig};
use aegis_logging::{init_logger, LogOptions};
use anyhow::{Context, Result};

/// `--config` when given, otherwise `config.yaml` in the config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path(&config_dir()),
    }
}

pub async fn load(explicit: Option<&Path>) -> Result<AegisConfig> {
    let path = resolve_config_path(explicit);
    load_and_prepare(&path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Logger options from the `logging` section. One-shot commands keep stdout
/// for their result and only log warnings unless `RUST_LOG` says otherwise.
pub fn log_options(config: &AegisConfig, one_shot: bool) -> LogOptions {
    let logging = config.logging.clone().unwrap_or_default();
    let mut options = LogOptions {
        level: logging.level.unwrap_or_else(|| "info".to_string()),
        dir: logging.dir.map(PathBuf::from),
        json: logging.json.unwrap_or(false),
        stderr: one_shot,
    };
    if one_shot {
        options.level = "warn".to_string();
    }
    options
}

pub fn init_logging(config: &AegisConfig, one_shot: bool) -> Result<()> {
    init_logger(&log_options(config, one_shot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_config::LoggingConfig;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("/etc/aegis.yaml")));
        assert_eq!(path, PathBuf::from("/etc/aegis.yaml"));
        assert!(resolve_config_path(None).ends_with("config.yaml"));
    }

    #[test]
    fn one_shot_commands_log_quietly_to_stderr() {
        let config = AegisConfig {
            logging: Some(LoggingConfig {
                level: Some("debug".into()),
                dir: Some("/var/log/aegis".into()),
                json: Some(true),
            }),
            ..Default::default()
        };
        let serve = log_options(&config, false);
        assert_eq!(serve.level, "debug");
        assert!(!serve.stderr);
        assert_eq!(serve.dir, Some(PathBuf::from("/var/log/aegis")));

        let extract = log_options(&config, true);
        assert_eq!(extract.level, "warn");
        assert!(extract.stderr);
    }

    #[tokio::test]
    async fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aegis.yaml");
        tokio::fs::write(&path, "gateway:\n  port: 8200\n").await.unwrap();
        let config = load(Some(&path)).await.unwrap();
        assert_eq!(config.gateway.unwrap().port, Some(8200));
    }
}
