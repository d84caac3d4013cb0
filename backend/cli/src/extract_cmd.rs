//! `aegis extract <FILE>`

use std::path::Path;

use aegis_core::Document;
use aegis_gateway::ocr_settings_from_config;
use aegis_understanding::{process_document, DocumentReader};
use anyhow::{Context, Result};

use crate::settings;

pub async fn run(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let config = settings::load(config_path).await?;
    settings::init_logging(&config, true)?;

    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let document = Document::new(filename, bytes)?;
    let reader = DocumentReader::from_settings(ocr_settings_from_config(&config));
    let record = process_document(&reader, &document).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
