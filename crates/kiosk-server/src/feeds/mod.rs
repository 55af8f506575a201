//! Server-side feed components: TTL-gated caches over the HTTP
//! clients, with fetches running off the tick thread.

pub mod flight_feed;
pub mod weather_cache;

pub use flight_feed::{FlightFeed, FlightSource};
pub use weather_cache::WeatherCache;
