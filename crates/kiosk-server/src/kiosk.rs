//! Per-tick orchestration.
//!
//! Owns the two feed caches and the flight tracker; the snapshot
//! builder itself stays stateless. Each tick consults the weather
//! cache, recomputes the tracker's extrapolation, feeds any newly
//! aggregated record into the tracker while idle, and assembles one
//! immutable snapshot.

use std::time::Instant;

use chrono::{DateTime, Utc};

use kiosk_core::{AirportTable, DisplaySnapshot, FlightTracker, TrackerTick};

use crate::feeds::{FlightFeed, WeatherCache};
use crate::reference::LogoMap;
use crate::snapshot;

pub struct Kiosk {
    weather: WeatherCache,
    flights: FlightFeed,
    tracker: FlightTracker,
    airports: AirportTable,
    logos: LogoMap,
    airport_code: String,
    default_arrival_city: String,
}

impl Kiosk {
    pub fn new(
        weather: WeatherCache,
        flights: FlightFeed,
        tracker: FlightTracker,
        airports: AirportTable,
        logos: LogoMap,
        airport_code: String,
        default_arrival_city: String,
    ) -> Self {
        Self {
            weather,
            flights,
            tracker,
            airports,
            logos,
            airport_code,
            default_arrival_city,
        }
    }

    /// Build the display state for this tick.
    pub fn tick(&mut self, now: Instant, wall: DateTime<Utc>) -> DisplaySnapshot {
        self.weather.refresh_if_due(now);

        match self.tracker.tick(wall) {
            TrackerTick::Descending(view) => snapshot::descending_snapshot(
                &view,
                self.weather.current(),
                wall,
                &self.airport_code,
                &self.default_arrival_city,
                &self.logos,
            ),
            TrackerTick::Reset => {
                tracing::info!("captured flight no longer trackable, listening for arrivals");
                self.flights.reset();
                self.idle(wall)
            }
            TrackerTick::Idle => {
                if let Some(record) = self.flights.poll(now) {
                    match self.tracker.capture(&record, &self.airports, wall) {
                        Ok(()) => {
                            tracing::info!(track_id = %record.track_id, "flight captured");
                            if let TrackerTick::Descending(view) = self.tracker.tick(wall) {
                                return snapshot::descending_snapshot(
                                    &view,
                                    self.weather.current(),
                                    wall,
                                    &self.airport_code,
                                    &self.default_arrival_city,
                                    &self.logos,
                                );
                            }
                        }
                        Err(err) => {
                            tracing::error!("arrival capture failed: {}", err);
                        }
                    }
                }
                self.idle(wall)
            }
        }
    }

    fn idle(&self, wall: DateTime<Utc>) -> DisplaySnapshot {
        snapshot::idle_snapshot(
            self.weather.current(),
            wall,
            &self.airport_code,
            &self.default_arrival_city,
            &self.logos,
        )
    }
}
