//! HTTP clients for the kiosk's two external feeds.

pub mod flightradar;
pub mod metar_client;

pub use flightradar::FlightRadarClient;
pub use metar_client::MetarClient;
