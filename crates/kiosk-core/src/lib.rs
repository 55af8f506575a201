pub mod airports;
pub mod metar;
pub mod models;
pub mod tracker;

pub use airports::{AirportTable, LookupMiss};
pub use metar::{decode, CloudCover, FlightRules, WeatherMetrics};
pub use models::{DisplaySnapshot, IconPosition, RawFlightRecord, Severity};
pub use tracker::{DescentView, FlightPhase, FlightSnapshot, FlightTracker, TrackerTick};
