//! Weather feed cache.
//!
//! Wraps the METAR client and decoder behind a TTL gate. Fetches run
//! as spawned tasks so the tick loop never blocks on the weather
//! host; a completed fetch is published wholesale on the next tick.
//! On failure the previous metrics are retained verbatim and the TTL
//! clock still advances.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use kiosk_core::{metar, WeatherMetrics};
use kiosk_feeds::MetarClient;

use crate::gate::FeedGate;

pub struct WeatherCache {
    client: Arc<MetarClient>,
    gate: FeedGate,
    current: Option<WeatherMetrics>,
    tx: mpsc::UnboundedSender<anyhow::Result<String>>,
    rx: mpsc::UnboundedReceiver<anyhow::Result<String>>,
}

impl WeatherCache {
    pub fn new(client: MetarClient, ttl: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            gate: FeedGate::new(ttl),
            current: None,
            tx,
            rx,
        }
    }

    /// Drain any completed fetch, then start a new one if the TTL
    /// allows. Called once per tick.
    pub fn refresh_if_due(&mut self, now: Instant) {
        while let Ok(result) = self.rx.try_recv() {
            self.gate.finish();
            match result {
                Ok(raw) => {
                    let metrics = metar::decode(&raw);
                    tracing::info!(?metrics, "METAR refreshed");
                    self.current = Some(metrics);
                }
                Err(err) => {
                    tracing::warn!("METAR fetch failed: {:#}", err);
                }
            }
        }

        if self.gate.try_begin(now) {
            let client = self.client.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(client.fetch_raw().await);
            });
        }
    }

    /// The most recently decoded metrics, if any fetch has succeeded.
    pub fn current(&self) -> Option<&WeatherMetrics> {
        self.current.as_ref()
    }
}
