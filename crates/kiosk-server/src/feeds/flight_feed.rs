//! Flight feed aggregator.
//!
//! Gates the search + enrichment cycle behind a 15 second TTL
//! measured from the last *attempt*, runs the fetch off the tick
//! thread, and hands newly merged records to the tracker. After a
//! tracker reset the gate is forced due and any fetch still in flight
//! from before the reset is discarded via an epoch check.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use kiosk_core::RawFlightRecord;
use kiosk_feeds::FlightRadarClient;

use crate::gate::FeedGate;

/// Where flight records come from: the live API, or a fixed record
/// for bench testing the display pipeline.
pub enum FlightSource {
    Live(Arc<FlightRadarClient>),
    Fixed(RawFlightRecord),
}

type FetchResult = (u64, anyhow::Result<Option<RawFlightRecord>>);

pub struct FlightFeed {
    source: FlightSource,
    gate: FeedGate,
    epoch: u64,
    tx: mpsc::UnboundedSender<FetchResult>,
    rx: mpsc::UnboundedReceiver<FetchResult>,
}

impl FlightFeed {
    pub fn new(source: FlightSource, gate: FeedGate) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            gate,
            epoch: 0,
            tx,
            rx,
        }
    }

    /// Drain completed fetches and start a new one when due. Returns
    /// a newly produced record, if any. Called only while the tracker
    /// is idle.
    pub fn poll(&mut self, now: Instant) -> Option<RawFlightRecord> {
        let mut produced = None;

        while let Ok((epoch, result)) = self.rx.try_recv() {
            self.gate.finish();
            if epoch != self.epoch {
                tracing::debug!("discarding flight fetch result from before reset");
                continue;
            }
            match result {
                Ok(Some(record)) => {
                    tracing::info!(track_id = %record.track_id, "inbound flight found");
                    produced = Some(record);
                }
                Ok(None) => {
                    tracing::debug!("no inbound traffic this cycle");
                }
                Err(err) => {
                    tracing::warn!("flight feed fetch failed: {:#}", err);
                }
            }
        }

        if produced.is_none() && self.gate.try_begin(now) {
            match &self.source {
                FlightSource::Fixed(record) => {
                    self.gate.finish();
                    tracing::info!("using fixed debug flight record");
                    produced = Some(record.clone());
                }
                FlightSource::Live(client) => {
                    let client = client.clone();
                    let tx = self.tx.clone();
                    let epoch = self.epoch;
                    tokio::spawn(async move {
                        let _ = tx.send((epoch, client.fetch_arrival().await));
                    });
                }
            }
        }

        produced
    }

    /// Called on tracker reset: make the next attempt due immediately
    /// and invalidate anything still in flight.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.gate.force();
    }
}
