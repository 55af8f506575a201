//! Flightradar24 API client.
//!
//! One refresh is two sequential calls: a bounded inbound search, then
//! a flight-summary enrichment for the first hit. The two JSON payloads
//! are merged non-destructively before deserializing into a
//! [`RawFlightRecord`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Map, Value};

use kiosk_core::RawFlightRecord;

/// HTTP client for the Flightradar24 live feed and summary endpoints.
pub struct FlightRadarClient {
    client: Client,
    base_url: String,
    auth_token: String,
    accept_version: String,
    bounds: String,
    airport_code: String,
    altitude_ceiling_ft: u32,
}

impl FlightRadarClient {
    pub fn new(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        accept_version: impl Into<String>,
        bounds: impl Into<String>,
        airport_code: impl Into<String>,
        altitude_ceiling_ft: u32,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            accept_version: accept_version.into(),
            bounds: bounds.into(),
            airport_code: airport_code.into(),
            altitude_ceiling_ft,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    /// Run one full search + enrichment cycle.
    ///
    /// `Ok(None)` means the search found no inbound traffic. Any
    /// transport error or non-success status at either stage aborts
    /// the whole cycle so the caller's cached record stays untouched.
    pub async fn fetch_arrival(&self) -> Result<Option<RawFlightRecord>> {
        let Some(mut base) = self.search_inbound().await? else {
            return Ok(None);
        };

        let track_id = base
            .get("fr24_id")
            .and_then(|value| value.as_str())
            .context("Search entry missing fr24_id")?
            .to_string();

        if let Some(summary) = self.fetch_summary(&track_id).await? {
            merge_missing(&mut base, &summary);
        }

        let record: RawFlightRecord = serde_json::from_value(Value::Object(base))
            .context("Failed to deserialize merged flight record")?;
        tracing::debug!(track_id = %record.track_id, "flight record merged");
        Ok(Some(record))
    }

    /// Search for traffic inbound to the monitored airport below the
    /// altitude ceiling. The first entry is the authoritative base
    /// record.
    async fn search_inbound(&self) -> Result<Option<Map<String, Value>>> {
        let url = format!("{}/live", self.base_url);
        let airports = format!("inbound:{}", self.airport_code);
        let altitude_ranges = format!("0-{}", self.altitude_ceiling_ft);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Accept-Version", &self.accept_version)
            .header("Authorization", self.auth_header())
            .query(&[
                ("bounds", self.bounds.as_str()),
                ("airports", airports.as_str()),
                ("altitude_ranges", altitude_ranges.as_str()),
            ])
            .send()
            .await
            .context("Failed to search inbound flights")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Flight search failed: {} {}",
                status,
                body
            ));
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to parse flight search response")?;

        Ok(first_data_entry(&payload))
    }

    /// Fetch the summary record used to fill fields the search stage
    /// left absent.
    async fn fetch_summary(&self, track_id: &str) -> Result<Option<Map<String, Value>>> {
        let url = format!("{}/flight-summary/full", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Accept-Version", &self.accept_version)
            .header("Authorization", self.auth_header())
            .query(&[("flight_ids", track_id)])
            .send()
            .await
            .context("Failed to fetch flight summary")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Flight summary failed: {} {}",
                status,
                body
            ));
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to parse flight summary response")?;

        Ok(first_data_entry(&payload))
    }
}

fn first_data_entry(payload: &Value) -> Option<Map<String, Value>> {
    payload
        .get("data")
        .and_then(|value| value.as_array())
        .and_then(|entries| entries.first())
        .and_then(|entry| entry.as_object())
        .cloned()
}

/// Non-destructive union: keys already present in `base` are never
/// overwritten, so the search stage stays authoritative.
pub fn merge_missing(base: &mut Map<String, Value>, extra: &Map<String, Value>) {
    for (key, value) in extra {
        if !base.contains_key(key) {
            base.insert(key.clone(), value.clone());
        }
    }
}
