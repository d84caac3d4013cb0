//! `aegis serve`

use std::path::Path;
use std::sync::Arc;

use aegis_gateway::{
    ocr_settings_from_config, policy_from_config, serve, GatewaySettings, GatewayState,
};
use aegis_understanding::{DocumentReader, TesseractRecognizer};
use anyhow::Result;
use tracing::{info, warn};

use crate::settings;

pub async fn run(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = settings::load(config_path).await?;
    settings::init_logging(&config, false)?;

    let mut gateway = GatewaySettings::from_config(&config);
    if let Some(host) = host {
        gateway.host = host;
    }
    if let Some(port) = port {
        gateway.port = port;
    }

    let ocr = ocr_settings_from_config(&config);
    // Requests still succeed for .txt uploads without an engine.
    match TesseractRecognizer::new(ocr.clone()).initialize().await {
        Ok(engine) => info!(program = %engine.program, version = %engine.version, "OCR engine ready"),
        Err(e) => warn!(error = %e, "OCR engine unavailable; image and PDF uploads will fail"),
    }

    let policy = policy_from_config(&config);
    info!(
        host = %gateway.host,
        port = gateway.port,
        test_label = %policy.test_label,
        max_upload_bytes = gateway.max_upload_bytes,
        "Starting UnivAegis gateway"
    );

    let state = GatewayState::new(Arc::new(DocumentReader::from_settings(ocr)), policy);
    serve(gateway, state).await?;
    Ok(())
}
