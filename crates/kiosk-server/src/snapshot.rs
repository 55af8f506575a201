//! Display snapshot assembly.
//!
//! Pure formatting: the tick loop feeds in whatever the caches and
//! tracker currently hold and gets back one immutable snapshot. The
//! monitoring placeholders and display formats match the kiosk's
//! established look.

use chrono::{DateTime, Utc};

use kiosk_core::{DescentView, DisplaySnapshot, IconPosition, Severity, WeatherMetrics};

use crate::reference::LogoMap;

/// Altitude above which the plane icon pins to the top of the
/// approach-path graphic.
const ICON_CLAMP_FT: f64 = 2000.0;

/// Snapshot shown while no flight is captured.
pub fn idle_snapshot(
    weather: Option<&WeatherMetrics>,
    now: DateTime<Utc>,
    airport_code: &str,
    arrival_city: &str,
    logos: &LogoMap,
) -> DisplaySnapshot {
    let mut snapshot = DisplaySnapshot {
        flight_number: "MONITORING".to_string(),
        callsign: "---".to_string(),
        departure_code: "---".to_string(),
        departure_city: " ".to_string(),
        arrival_code: airport_code.to_string(),
        arrival_city: arrival_city.to_string(),
        aircraft: String::new(),
        departure_time: "--:--".to_string(),
        arrival_time: "--:--".to_string(),
        delay: String::new(),
        status: String::new(),
        status_color: Severity::Nominal.color().to_string(),
        altitude: "---- FT".to_string(),
        speed: "--- KTS".to_string(),
        distance: "--- NM".to_string(),
        duration: "--:--".to_string(),
        approach_distance_nm: 0.0,
        clock: clock_string(now),
        logo_asset: logos.asset_for("---").to_string(),
        flight_rules_status: "---".to_string(),
        flight_rules_msg: String::new(),
        flight_rules_color: Severity::Neutral.color().to_string(),
        temperature: "--.-°C".to_string(),
        ceiling_status: "---- FT".to_string(),
        ceiling_msg: "Ceiling".to_string(),
        ceiling_color: Severity::Neutral.color().to_string(),
        wind_status: "-- KTS".to_string(),
        wind_msg: String::new(),
        wind_color: Severity::Neutral.color().to_string(),
        visibility_status: "-- SM".to_string(),
        visibility_msg: "Visibility".to_string(),
        visibility_color: Severity::Neutral.color().to_string(),
        altimeter: "--.-- inHg".to_string(),
        plane_icon: plane_icon(0.0),
    };
    apply_weather(&mut snapshot, weather);
    snapshot
}

/// Snapshot for a captured, descending flight.
pub fn descending_snapshot(
    view: &DescentView,
    weather: Option<&WeatherMetrics>,
    now: DateTime<Utc>,
    airport_code: &str,
    arrival_city: &str,
    logos: &LogoMap,
) -> DisplaySnapshot {
    let mut snapshot = idle_snapshot(weather, now, airport_code, arrival_city, logos);
    let flight = &view.flight;

    snapshot.flight_number = flight.flight_number.clone();
    snapshot.callsign = flight.callsign.clone();
    snapshot.departure_code = flight.departure_code.clone();
    snapshot.departure_city = flight.departure_city.clone();
    snapshot.arrival_code = flight.arrival_code.clone();
    snapshot.arrival_city = flight.arrival_city.clone();
    snapshot.aircraft = flight.aircraft.clone();
    snapshot.departure_time = flight.departure_time.clone();
    snapshot.arrival_time = flight.arrival_time.clone();
    snapshot.delay = "N/A".to_string();
    snapshot.status = view.phase.label().to_string();
    snapshot.status_color = view.phase.color().to_string();
    snapshot.altitude = format!("{} FT", view.display_altitude_ft);
    snapshot.speed = flight.speed.clone();
    snapshot.distance = flight.distance.clone();
    snapshot.duration = flight.duration.clone();
    snapshot.approach_distance_nm = view.distance_nm;
    snapshot.logo_asset = logos.asset_for(&flight.callsign).to_string();
    snapshot.plane_icon = plane_icon(view.altitude_ft);
    snapshot
}

fn apply_weather(snapshot: &mut DisplaySnapshot, weather: Option<&WeatherMetrics>) {
    let Some(metrics) = weather else {
        return;
    };

    snapshot.flight_rules_status = metrics.flight_rules.label().to_string();
    snapshot.flight_rules_msg = metrics.flight_rules.message().to_string();
    snapshot.flight_rules_color = metrics.flight_rules.severity().color().to_string();

    snapshot.temperature = match metrics.temperature_c {
        Some(temp) => format!("{:02}°C", temp),
        None => "N/A".to_string(),
    };

    match metrics.ceiling_ft {
        Some(ft) => {
            snapshot.ceiling_status = format!("{} FT", thousands(ft));
            snapshot.ceiling_msg = metrics
                .ceiling_cover
                .map(|cover| cover.message())
                .unwrap_or("Ceiling")
                .to_string();
        }
        None => {
            snapshot.ceiling_status = "N/A".to_string();
            snapshot.ceiling_msg = "Clear".to_string();
        }
    }
    snapshot.ceiling_color = metrics.ceiling_severity().color().to_string();

    match metrics.wind_speed_kt {
        Some(speed) => {
            snapshot.wind_status = format!("{} KTS", speed);
            snapshot.wind_msg = format!("{:03}°", metrics.wind_direction_deg.unwrap_or(0));
        }
        None => {
            snapshot.wind_status = "CALM".to_string();
            snapshot.wind_msg = "000°".to_string();
        }
    }
    snapshot.wind_color = metrics.wind_severity().color().to_string();

    snapshot.visibility_status = match metrics.visibility_sm {
        Some(sm) => format!("{} SM", sm),
        None => "N/A".to_string(),
    };
    snapshot.visibility_color = metrics.visibility_severity().color().to_string();

    snapshot.altimeter = match metrics.altimeter_inhg {
        Some(inhg) => format!("{:.2} inHg", inhg),
        None => "N/A".to_string(),
    };
}

/// Linear map of extrapolated altitude onto the approach-path
/// graphic's pixel range, clamped above 2000 ft.
pub fn plane_icon(altitude_ft: f64) -> IconPosition {
    let alt = altitude_ft.min(ICON_CLAMP_FT);
    let x = (1470.0 + alt * 356.0 / 2000.0) as i32 - 23;
    let y = ((390.0 - alt * 110.0 / 2000.0) as i32).min(381) - 17;
    IconPosition { x, y }
}

pub fn clock_string(now: DateTime<Utc>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Thousands-separated integer, e.g. 25000 -> "25,000".
fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kiosk_core::{metar, tracker::glide_distance_nm, FlightPhase, FlightSnapshot};

    fn logos() -> LogoMap {
        LogoMap::empty("default.png".to_string())
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 45).unwrap()
    }

    #[test]
    fn idle_snapshot_uses_monitoring_placeholders() {
        let snapshot = idle_snapshot(None, noon(), "SAN", "San Diego, CA", &logos());
        assert_eq!(snapshot.flight_number, "MONITORING");
        assert_eq!(snapshot.altitude, "---- FT");
        assert_eq!(snapshot.arrival_code, "SAN");
        assert_eq!(snapshot.arrival_city, "San Diego, CA");
        assert_eq!(snapshot.clock, "12:30:45");
        assert_eq!(snapshot.temperature, "--.-°C");
        assert_eq!(snapshot.logo_asset, "default.png");
    }

    #[test]
    fn weather_fields_format_from_metrics() {
        let metrics = metar::decode("KSAN 221851Z 29003KT 10SM OVC008 21/14 A2992");
        let snapshot = idle_snapshot(Some(&metrics), noon(), "SAN", "San Diego, CA", &logos());

        assert_eq!(snapshot.flight_rules_status, "IFR");
        assert_eq!(snapshot.flight_rules_msg, "Caution");
        assert_eq!(snapshot.flight_rules_color, "#B51700");
        assert_eq!(snapshot.temperature, "21°C");
        assert_eq!(snapshot.ceiling_status, "800 FT");
        assert_eq!(snapshot.ceiling_msg, "Overcast");
        assert_eq!(snapshot.ceiling_color, "#B51700");
        assert_eq!(snapshot.wind_status, "3 KTS");
        assert_eq!(snapshot.wind_msg, "290°");
        assert_eq!(snapshot.wind_color, "#B51700");
        assert_eq!(snapshot.visibility_status, "10 SM");
        assert_eq!(snapshot.visibility_color, "#017100");
        assert_eq!(snapshot.altimeter, "29.92 inHg");
    }

    #[test]
    fn calm_wind_when_pattern_absent() {
        let metrics = metar::decode("KSAN 221851Z 10SM FEW250 21/14 A2992");
        let snapshot = idle_snapshot(Some(&metrics), noon(), "SAN", "San Diego, CA", &logos());
        assert_eq!(snapshot.wind_status, "CALM");
        assert_eq!(snapshot.wind_msg, "000°");
        assert_eq!(snapshot.wind_color, "#5E5E5E");
    }

    #[test]
    fn ceiling_uses_thousands_separator() {
        let metrics = metar::decode("KSAN 221851Z 29010KT 10SM FEW250 21/14 A2992");
        let snapshot = idle_snapshot(Some(&metrics), noon(), "SAN", "San Diego, CA", &logos());
        assert_eq!(snapshot.ceiling_status, "25,000 FT");
    }

    #[test]
    fn descending_snapshot_reflects_phase_and_altitude() {
        let view = DescentView {
            flight: FlightSnapshot {
                flight_number: "UAL1234".to_string(),
                callsign: "UAL".to_string(),
                departure_code: "SFO".to_string(),
                departure_city: "San Francisco, CA".to_string(),
                arrival_code: "SAN".to_string(),
                arrival_city: "San Diego, CA".to_string(),
                aircraft: "B738".to_string(),
                departure_time: "17:05".to_string(),
                arrival_time: "18:35".to_string(),
                duration: "01:30".to_string(),
                speed: "210 KTS".to_string(),
                distance: "400 NM".to_string(),
                captured_altitude_ft: 4200.0,
                captured_at: noon(),
            },
            altitude_ft: 1500.0,
            display_altitude_ft: 1500,
            distance_nm: glide_distance_nm(1500.0),
            phase: FlightPhase::Final,
        };

        let snapshot =
            descending_snapshot(&view, None, noon(), "SAN", "San Diego, CA", &logos());
        assert_eq!(snapshot.flight_number, "UAL1234");
        assert_eq!(snapshot.status, "FINAL");
        assert_eq!(snapshot.status_color, "#E57301");
        assert_eq!(snapshot.altitude, "1500 FT");
        assert_eq!(snapshot.delay, "N/A");
        assert!((snapshot.approach_distance_nm - 3.75).abs() < 1e-9);
    }

    #[test]
    fn plane_icon_clamps_above_two_thousand_feet() {
        assert_eq!(plane_icon(2000.0), plane_icon(5000.0));
        assert_eq!(plane_icon(2000.0), IconPosition { x: 1803, y: 263 });
    }

    #[test]
    fn plane_icon_at_threshold() {
        assert_eq!(plane_icon(0.0), IconPosition { x: 1447, y: 364 });
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(800), "800");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(25000), "25,000");
    }
}
