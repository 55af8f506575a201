//! Flight-state tracker.
//!
//! Captures an arriving flight once, then runs open-loop: every tick
//! the altitude is extrapolated with a constant-descent-rate model so
//! the display stays smooth regardless of feed latency. No further
//! network polling happens for a captured flight; the tracker resets
//! itself once the aircraft must have landed and disappeared.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::airports::{AirportTable, LookupMiss};
use crate::models::RawFlightRecord;

/// Extrapolated altitude above which the flight is on approach.
const APPROACH_THRESHOLD_FT: f64 = 2000.0;

/// Default guard below which the aircraft is no longer trackable.
const DEFAULT_RESET_FLOOR_FT: f64 = -250.0;

/// Simplified glide-slope model: nautical miles to threshold as a
/// linear function of altitude.
pub fn glide_distance_nm(altitude_ft: f64) -> f64 {
    altitude_ft * 5.0 / 2000.0
}

/// Display-relevant fields frozen at capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub flight_number: String,
    pub callsign: String,
    pub departure_code: String,
    pub departure_city: String,
    pub arrival_code: String,
    pub arrival_city: String,
    pub aircraft: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub speed: String,
    pub distance: String,
    pub captured_altitude_ft: f64,
    pub captured_at: DateTime<Utc>,
}

/// Descent phase derived from the current extrapolated altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightPhase {
    Approach,
    Final,
    Landed,
}

impl FlightPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FlightPhase::Approach => "APPROACH",
            FlightPhase::Final => "FINAL",
            FlightPhase::Landed => "LANDED",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            FlightPhase::Approach => "#004D80",
            FlightPhase::Final => "#E57301",
            FlightPhase::Landed => "#017100",
        }
    }
}

/// One tick's derived view of the captured flight.
#[derive(Debug, Clone)]
pub struct DescentView {
    pub flight: FlightSnapshot,
    /// Unfloored model altitude; drives phase and icon position.
    pub altitude_ft: f64,
    /// Altitude for display, floored at the touchdown elevation.
    pub display_altitude_ft: i64,
    pub distance_nm: f64,
    pub phase: FlightPhase,
}

/// Outcome of one tracker tick.
#[derive(Debug, Clone)]
pub enum TrackerTick {
    /// No flight captured; show monitoring defaults.
    Idle,
    Descending(DescentView),
    /// The capture was just cleared; the flight feed should be polled
    /// immediately so a new arrival is picked up promptly.
    Reset,
}

/// The state machine: Idle until a raw record is captured, then
/// Descending until the reset guard fires.
#[derive(Debug, Clone)]
pub struct FlightTracker {
    descent_rate_fpm: f64,
    touchdown_elevation_ft: f64,
    reset_floor_ft: f64,
    captured: Option<FlightSnapshot>,
}

impl FlightTracker {
    pub fn new(descent_rate_fpm: f64, touchdown_elevation_ft: f64) -> Self {
        Self {
            descent_rate_fpm,
            touchdown_elevation_ft,
            reset_floor_ft: DEFAULT_RESET_FLOOR_FT,
            captured: None,
        }
    }

    pub fn with_reset_floor(mut self, reset_floor_ft: f64) -> Self {
        self.reset_floor_ft = reset_floor_ft;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.captured.is_none()
    }

    /// Adopt a raw flight record and begin local extrapolation.
    ///
    /// Route cities are resolved through the airport table; a code
    /// present in the record but absent from the table is a hard
    /// error and the capture does not happen.
    pub fn capture(
        &mut self,
        record: &RawFlightRecord,
        airports: &AirportTable,
        now: DateTime<Utc>,
    ) -> Result<(), LookupMiss> {
        let departure_code = record.orig_iata.clone().unwrap_or_else(|| "---".to_string());
        let departure_city = match &record.orig_iata {
            Some(code) => airports.city(code)?.to_string(),
            None => " ".to_string(),
        };
        let arrival_code = record.dest_iata.clone().unwrap_or_else(|| "---".to_string());
        let arrival_city = match &record.dest_iata {
            Some(code) => airports.city(code)?.to_string(),
            None => " ".to_string(),
        };

        let departure_time = hhmm_of(record.datetime_takeoff.as_deref());
        let arrival_time = hhmm_of(record.eta.as_deref());
        let duration =
            time_diff(&departure_time, &arrival_time).unwrap_or_else(|| "--:--".to_string());

        self.captured = Some(FlightSnapshot {
            flight_number: record.callsign.clone().unwrap_or_else(|| "---".to_string()),
            callsign: record.painted_as.clone().unwrap_or_else(|| "---".to_string()),
            departure_code,
            departure_city,
            arrival_code,
            arrival_city,
            aircraft: record.aircraft_type.clone().unwrap_or_default(),
            departure_time,
            arrival_time,
            duration,
            speed: match record.gspeed {
                Some(kt) => format!("{} KTS", kt as i64),
                None => "--- KTS".to_string(),
            },
            distance: match record.actual_distance {
                Some(km) => format!("{} NM", (km / 1.852) as i64),
                None => "--- NM".to_string(),
            },
            captured_altitude_ft: record.alt.unwrap_or(0.0),
            captured_at: now,
        });
        Ok(())
    }

    /// Recompute the extrapolation for this tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TrackerTick {
        let Some(flight) = &self.captured else {
            return TrackerTick::Idle;
        };

        let elapsed_min = (now - flight.captured_at).num_milliseconds() as f64 / 60_000.0;
        let altitude_ft = flight.captured_altitude_ft - self.descent_rate_fpm * elapsed_min;

        if altitude_ft < self.reset_floor_ft {
            self.captured = None;
            return TrackerTick::Reset;
        }

        let phase = if altitude_ft > APPROACH_THRESHOLD_FT {
            FlightPhase::Approach
        } else if altitude_ft > self.touchdown_elevation_ft {
            FlightPhase::Final
        } else {
            FlightPhase::Landed
        };

        TrackerTick::Descending(DescentView {
            flight: flight.clone(),
            altitude_ft,
            display_altitude_ft: altitude_ft.max(self.touchdown_elevation_ft) as i64,
            distance_nm: glide_distance_nm(altitude_ft),
            phase,
        })
    }
}

/// The HH:MM portion of an ISO-8601 timestamp, or the `--:--` sentinel.
fn hhmm_of(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| ts.get(11..16))
        .unwrap_or("--:--")
        .to_string()
}

/// Absolute difference between two HH:MM strings, formatted HH:MM.
fn time_diff(t1: &str, t2: &str) -> Option<String> {
    let a = NaiveTime::parse_from_str(t1, "%H:%M").ok()?;
    let b = NaiveTime::parse_from_str(t2, "%H:%M").ok()?;
    let minutes = (b - a).abs().num_minutes();
    Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(alt: f64) -> RawFlightRecord {
        RawFlightRecord {
            track_id: "3a1b2c3d".to_string(),
            callsign: Some("UAL1234".to_string()),
            painted_as: Some("UAL".to_string()),
            orig_iata: Some("SFO".to_string()),
            dest_iata: Some("SAN".to_string()),
            aircraft_type: Some("B738".to_string()),
            datetime_takeoff: Some("2025-01-15T17:05:00Z".to_string()),
            eta: Some("2025-01-15T18:35:00Z".to_string()),
            alt: Some(alt),
            gspeed: Some(210.0),
            actual_distance: Some(740.8),
        }
    }

    fn airports() -> AirportTable {
        let mut table = AirportTable::new();
        table.insert("SFO", "San Francisco, CA");
        table.insert("SAN", "San Diego, CA");
        table
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 18, 0, 0).unwrap()
    }

    fn view_at(tracker: &mut FlightTracker, at: DateTime<Utc>) -> DescentView {
        match tracker.tick(at) {
            TrackerTick::Descending(view) => view,
            other => panic!("expected Descending, got {:?}", other),
        }
    }

    #[test]
    fn capture_freezes_display_fields() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        tracker.capture(&record(3000.0), &airports(), t0()).unwrap();

        let view = view_at(&mut tracker, t0());
        assert_eq!(view.flight.flight_number, "UAL1234");
        assert_eq!(view.flight.departure_city, "San Francisco, CA");
        assert_eq!(view.flight.arrival_city, "San Diego, CA");
        assert_eq!(view.flight.departure_time, "17:05");
        assert_eq!(view.flight.arrival_time, "18:35");
        assert_eq!(view.flight.duration, "01:30");
        assert_eq!(view.flight.speed, "210 KTS");
        assert_eq!(view.flight.distance, "400 NM");
    }

    #[test]
    fn unknown_airport_blocks_capture() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        let mut incomplete = AirportTable::new();
        incomplete.insert("SAN", "San Diego, CA");
        let err = tracker
            .capture(&record(3000.0), &incomplete, t0())
            .unwrap_err();
        assert_eq!(err.code, "SFO");
        assert!(tracker.is_idle());
    }

    #[test]
    fn altitude_is_monotonically_non_increasing() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        tracker.capture(&record(3000.0), &airports(), t0()).unwrap();

        let mut last = f64::INFINITY;
        for seconds in (0..240).step_by(10) {
            let view = view_at(&mut tracker, t0() + Duration::seconds(seconds));
            assert!(view.altitude_ft <= last);
            last = view.altitude_ft;
        }
    }

    #[test]
    fn descent_reaches_zero_after_five_minutes_at_600_fpm() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        tracker.capture(&record(3000.0), &airports(), t0()).unwrap();

        let view = view_at(&mut tracker, t0() + Duration::minutes(5));
        assert!((view.altitude_ft - 0.0).abs() < 1e-9);
        assert_eq!(view.display_altitude_ft, 0);
    }

    #[test]
    fn display_altitude_floors_at_touchdown_elevation() {
        let mut tracker = FlightTracker::new(600.0, 17.0);
        tracker.capture(&record(3000.0), &airports(), t0()).unwrap();

        let view = view_at(&mut tracker, t0() + Duration::minutes(5));
        assert!(view.altitude_ft < 17.0);
        assert_eq!(view.display_altitude_ft, 17);
    }

    #[test]
    fn phase_thresholds_are_exact() {
        let mut tracker = FlightTracker::new(60.0, 100.0);
        tracker.capture(&record(2001.0), &airports(), t0()).unwrap();

        // 2001 ft at capture time.
        assert_eq!(view_at(&mut tracker, t0()).phase, FlightPhase::Approach);
        // One minute later: exactly 1941 ft < 2000 -> FINAL.
        let view = view_at(&mut tracker, t0() + Duration::minutes(1));
        assert_eq!(view.phase, FlightPhase::Final);
    }

    #[test]
    fn exactly_2000_ft_is_final_not_approach() {
        let mut tracker = FlightTracker::new(600.0, 100.0);
        tracker.capture(&record(2000.0), &airports(), t0()).unwrap();
        assert_eq!(view_at(&mut tracker, t0()).phase, FlightPhase::Final);
    }

    #[test]
    fn at_or_below_field_elevation_is_landed() {
        let mut tracker = FlightTracker::new(600.0, 100.0);
        tracker.capture(&record(100.0), &airports(), t0()).unwrap();
        assert_eq!(view_at(&mut tracker, t0()).phase, FlightPhase::Landed);
    }

    #[test]
    fn reset_fires_when_altitude_drops_below_guard() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        tracker.capture(&record(3000.0), &airports(), t0()).unwrap();

        // 3000 ft at 600 fpm crosses -250 ft shortly after 5m25s.
        let just_before = t0() + Duration::seconds(325);
        assert!(matches!(
            tracker.tick(just_before),
            TrackerTick::Descending(_)
        ));

        let just_after = t0() + Duration::seconds(326);
        assert!(matches!(tracker.tick(just_after), TrackerTick::Reset));
        assert!(tracker.is_idle());
        assert!(matches!(tracker.tick(just_after), TrackerTick::Idle));
    }

    #[test]
    fn glide_distance_is_linear_in_altitude() {
        assert!((glide_distance_nm(2000.0) - 5.0).abs() < 1e-9);
        assert!((glide_distance_nm(1000.0) - 2.5).abs() < 1e-9);
        assert_eq!(glide_distance_nm(0.0), 0.0);
    }

    #[test]
    fn missing_times_degrade_to_sentinels() {
        let mut tracker = FlightTracker::new(600.0, 0.0);
        let mut rec = record(3000.0);
        rec.datetime_takeoff = None;
        rec.eta = Some("bogus".to_string());
        tracker.capture(&rec, &airports(), t0()).unwrap();

        let view = view_at(&mut tracker, t0());
        assert_eq!(view.flight.departure_time, "--:--");
        assert_eq!(view.flight.duration, "--:--");
    }
}
