//! CLI Status Command
//!
//! Asks a running gateway for its health report.

use aegis_config::defaults::DEFAULT_PORT;
use anyhow::Result;

use crate::terminal_output::{paint, GREEN, YELLOW};

pub async fn run(port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(DEFAULT_PORT);
    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{} on port {port}", paint("UnivAegis is running", GREEN));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("{}", paint(&format!("UnivAegis is not running on port {port}"), YELLOW));
        }
    }
    Ok(())
}
