//! Static reference data loaded once at process start.
//!
//! A missing file or malformed row here is a configuration gap, so
//! every loader is fatal rather than best-effort.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use kiosk_core::{AirportTable, RawFlightRecord};

#[derive(Debug, Deserialize)]
struct AirportRow {
    key: String,
    city: String,
}

/// Load the airport-code to city table from CSV (`key,city` headers).
pub fn load_airports(path: &Path) -> Result<AirportTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open airport table {}", path.display()))?;

    let mut table = AirportTable::new();
    for row in reader.deserialize() {
        let row: AirportRow = row.context("Malformed airport table row")?;
        table.insert(row.key, row.city);
    }

    anyhow::ensure!(!table.is_empty(), "Airport table {} is empty", path.display());
    Ok(table)
}

/// Callsign to logo-asset lookup with a configured fallback.
#[derive(Debug, Clone)]
pub struct LogoMap {
    assets: HashMap<String, String>,
    default_asset: String,
}

impl LogoMap {
    pub fn new(assets: HashMap<String, String>, default_asset: String) -> Self {
        Self {
            assets,
            default_asset,
        }
    }

    pub fn empty(default_asset: String) -> Self {
        Self::new(HashMap::new(), default_asset)
    }

    pub fn asset_for(&self, callsign: &str) -> &str {
        self.assets
            .get(callsign)
            .map(String::as_str)
            .unwrap_or(&self.default_asset)
    }
}

/// Load the callsign to logo map from a RON file of string pairs.
pub fn load_logo_map(path: Option<&Path>, default_asset: String) -> Result<LogoMap> {
    let Some(path) = path else {
        return Ok(LogoMap::empty(default_asset));
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read logo map {}", path.display()))?;
    let assets: HashMap<String, String> =
        ron::from_str(&text).with_context(|| format!("Malformed logo map {}", path.display()))?;

    Ok(LogoMap::new(assets, default_asset))
}

/// Fixed flight record for the debug data source, hand-editable field
/// names instead of the feed's wire names.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugFlight {
    pub track_id: String,
    pub callsign: String,
    pub painted_as: String,
    pub orig_iata: String,
    pub dest_iata: String,
    pub aircraft_type: String,
    pub datetime_takeoff: String,
    pub eta: String,
    pub altitude_ft: f64,
    pub ground_speed_kt: f64,
    pub distance_traveled_km: f64,
}

impl From<DebugFlight> for RawFlightRecord {
    fn from(debug: DebugFlight) -> Self {
        RawFlightRecord {
            track_id: debug.track_id,
            callsign: Some(debug.callsign),
            painted_as: Some(debug.painted_as),
            orig_iata: Some(debug.orig_iata),
            dest_iata: Some(debug.dest_iata),
            aircraft_type: Some(debug.aircraft_type),
            datetime_takeoff: Some(debug.datetime_takeoff),
            eta: Some(debug.eta),
            alt: Some(debug.altitude_ft),
            gspeed: Some(debug.ground_speed_kt),
            actual_distance: Some(debug.distance_traveled_km),
        }
    }
}

/// Load the fixed debug flight from a RON file.
pub fn load_debug_flight(path: &Path) -> Result<RawFlightRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read debug flight {}", path.display()))?;
    let debug: DebugFlight = ron::from_str(&text)
        .with_context(|| format!("Malformed debug flight {}", path.display()))?;
    Ok(debug.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_map_falls_back_to_default() {
        let mut assets = HashMap::new();
        assets.insert("UAL".to_string(), "united.png".to_string());
        let logos = LogoMap::new(assets, "default.png".to_string());

        assert_eq!(logos.asset_for("UAL"), "united.png");
        assert_eq!(logos.asset_for("XXX"), "default.png");
    }

    #[test]
    fn debug_flight_parses_from_ron() {
        let text = r#"(
            track_id: "debug-1",
            callsign: "UAL1234",
            painted_as: "UAL",
            orig_iata: "SFO",
            dest_iata: "SAN",
            aircraft_type: "B738",
            datetime_takeoff: "2025-01-15T17:05:00Z",
            eta: "2025-01-15T18:35:00Z",
            altitude_ft: 4200.0,
            ground_speed_kt: 210.0,
            distance_traveled_km: 740.8,
        )"#;
        let debug: DebugFlight = ron::from_str(text).unwrap();
        let record: RawFlightRecord = debug.into();
        assert_eq!(record.track_id, "debug-1");
        assert_eq!(record.alt, Some(4200.0));
    }
}
