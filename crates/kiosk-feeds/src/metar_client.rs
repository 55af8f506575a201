//! METAR report fetch client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// Client for the aviationweather.gov raw-METAR endpoint. No
/// authentication; a hard 5 second timeout keeps a slow weather host
/// from holding a refresh cycle open.
pub struct MetarClient {
    client: Client,
    base_url: String,
    station: String,
}

impl MetarClient {
    pub fn new(base_url: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            station: station.into(),
        }
    }

    /// Fetch the current raw METAR report for the configured station.
    pub async fn fetch_raw(&self) -> Result<String> {
        let url = format!("{}/metar", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", self.station.as_str()), ("format", "raw")])
            .send()
            .await
            .context("Failed to fetch METAR")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("METAR request failed: {} {}", status, body));
        }

        let report = response.text().await.context("Failed to read METAR body")?;
        Ok(report.trim().to_string())
    }
}
