//! Core data models for the arrival kiosk.

use serde::{Deserialize, Serialize};

/// One arriving flight as merged from the search and enrichment
/// endpoints. The search response is authoritative; enrichment only
/// fills keys the search stage left absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFlightRecord {
    /// Feed-assigned track identifier.
    #[serde(rename = "fr24_id")]
    pub track_id: String,
    #[serde(default)]
    pub callsign: Option<String>,
    /// Livery operator, used for logo lookup.
    #[serde(default)]
    pub painted_as: Option<String>,
    #[serde(default)]
    pub orig_iata: Option<String>,
    #[serde(default)]
    pub dest_iata: Option<String>,
    #[serde(rename = "type", default)]
    pub aircraft_type: Option<String>,
    /// ISO-8601 takeoff time from the enrichment stage.
    #[serde(default)]
    pub datetime_takeoff: Option<String>,
    /// ISO-8601 estimated arrival time.
    #[serde(default)]
    pub eta: Option<String>,
    /// Barometric altitude in feet at search time.
    #[serde(default)]
    pub alt: Option<f64>,
    /// Ground speed in knots.
    #[serde(default)]
    pub gspeed: Option<f64>,
    /// Distance flown so far in kilometers.
    #[serde(default)]
    pub actual_distance: Option<f64>,
}

/// Severity band attached to each weather metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Metric absent or not applicable
    Neutral,
    Nominal,
    Caution,
    Warning,
}

impl Severity {
    /// Display color for the metric's badge.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Neutral => "#5E5E5E",
            Severity::Nominal => "#017100",
            Severity::Caution => "#DC582A",
            Severity::Warning => "#B51700",
        }
    }
}

/// Screen position of the animated plane icon on the approach path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}

/// The complete display state for one tick. Rebuilt wholesale every
/// tick by the snapshot builder; nothing else constructs this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub flight_number: String,
    pub callsign: String,
    pub departure_code: String,
    pub departure_city: String,
    pub arrival_code: String,
    pub arrival_city: String,
    pub aircraft: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub delay: String,
    pub status: String,
    pub status_color: String,
    pub altitude: String,
    pub speed: String,
    pub distance: String,
    pub duration: String,
    /// Glide-model distance to threshold in nautical miles.
    pub approach_distance_nm: f64,
    pub clock: String,
    /// Logo asset for the painted-as carrier.
    pub logo_asset: String,
    pub flight_rules_status: String,
    pub flight_rules_msg: String,
    pub flight_rules_color: String,
    pub temperature: String,
    pub ceiling_status: String,
    pub ceiling_msg: String,
    pub ceiling_color: String,
    pub wind_status: String,
    pub wind_msg: String,
    pub wind_color: String,
    pub visibility_status: String,
    pub visibility_msg: String,
    pub visibility_color: String,
    pub altimeter: String,
    pub plane_icon: IconPosition,
}
