//! Server configuration from environment.
//!
//! Missing required values are fatal at startup; everything else has
//! a default suitable for the KSAN reference deployment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Flight feed API base, e.g. https://fr24api.flightradar24.com/api
    pub flight_api_url: String,
    pub flight_api_token: String,
    pub flight_api_version: String,
    /// Weather API base, e.g. https://aviationweather.gov/api/data
    pub weather_api_url: String,
    /// METAR reporting station.
    pub station_code: String,
    /// Monitored arrival airport (IATA).
    pub airport_code: String,
    pub default_arrival_city: String,
    /// Search bounding box passed through to the flight feed.
    pub search_bounds: String,
    /// Only capture traffic below this altitude.
    pub altitude_ceiling_ft: u32,
    pub descent_rate_fpm: f64,
    pub touchdown_elevation_ft: f64,
    /// Extrapolated altitude below which the capture is dropped.
    pub reset_floor_ft: f64,
    pub airports_csv: PathBuf,
    pub logo_map_path: Option<PathBuf>,
    pub default_logo: String,
    /// When set, a fixed flight record replaces the live feed.
    pub debug_flight_path: Option<PathBuf>,
    pub weather_ttl: Duration,
    pub flight_ttl: Duration,
    pub tick_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let debug_flight_path = env::var("KIOSK_DEBUG_FLIGHT").ok().map(PathBuf::from);

        // The live feed needs credentials; the debug source does not.
        let flight_api_token = match env::var("FR24_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ if debug_flight_path.is_some() => String::new(),
            _ => anyhow::bail!("FR24_API_TOKEN must be set (or KIOSK_DEBUG_FLIGHT configured)"),
        };

        let airports_csv = env::var("KIOSK_AIRPORTS_CSV")
            .map(PathBuf::from)
            .context("KIOSK_AIRPORTS_CSV must point at the airport reference table")?;

        Ok(Self {
            server_port: parse_or("KIOSK_PORT", 3000)?,
            flight_api_url: var_or("FR24_API_URL", "https://fr24api.flightradar24.com/api"),
            flight_api_token,
            flight_api_version: var_or("FR24_ACCEPT_VERSION", "v1"),
            weather_api_url: var_or("WEATHER_API_URL", "https://aviationweather.gov/api/data"),
            station_code: var_or("KIOSK_METAR_STATION", "KSAN"),
            airport_code: var_or("KIOSK_AIRPORT", "SAN"),
            default_arrival_city: var_or("KIOSK_ARRIVAL_CITY", "San Diego, CA"),
            search_bounds: var_or("KIOSK_SEARCH_BOUNDS", "33.5,32.0,-118.8,-116.0"),
            altitude_ceiling_ft: parse_or("KIOSK_MONITOR_CEILING_FT", 10_000)?,
            descent_rate_fpm: parse_or("KIOSK_DESCENT_FPM", 600.0)?,
            touchdown_elevation_ft: parse_or("KIOSK_TDZE_FT", 17.0)?,
            reset_floor_ft: parse_or("KIOSK_RESET_FLOOR_FT", -250.0)?,
            airports_csv,
            logo_map_path: env::var("KIOSK_LOGO_MAP").ok().map(PathBuf::from),
            default_logo: var_or("KIOSK_DEFAULT_LOGO", "default.png"),
            debug_flight_path,
            weather_ttl: Duration::from_secs(parse_or("KIOSK_WEATHER_TTL_S", 300)?),
            flight_ttl: Duration::from_secs(parse_or("KIOSK_FLIGHT_TTL_S", 15)?),
            tick_interval: Duration::from_millis(parse_or("KIOSK_TICK_MS", 100)?),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, value)),
        Err(_) => Ok(default),
    }
}
