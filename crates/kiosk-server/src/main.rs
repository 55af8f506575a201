//! Arrival kiosk server - derives one coherent display state from the
//! weather and flight feeds and serves it to the rendering layer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kiosk_core::FlightTracker;
use kiosk_feeds::{FlightRadarClient, MetarClient};
use kiosk_server::config::Config;
use kiosk_server::feeds::{FlightFeed, FlightSource, WeatherCache};
use kiosk_server::gate::FeedGate;
use kiosk_server::kiosk::Kiosk;
use kiosk_server::loops::tick_loop::run_tick_loop;
use kiosk_server::state::AppState;
use kiosk_server::{api, reference, snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kiosk_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting arrival kiosk server...");

    let config = Config::from_env()?;

    let airports = reference::load_airports(&config.airports_csv)?;
    tracing::info!(entries = airports.len(), "airport table loaded");
    let logos = reference::load_logo_map(
        config.logo_map_path.as_deref(),
        config.default_logo.clone(),
    )?;

    let weather = WeatherCache::new(
        MetarClient::new(&config.weather_api_url, &config.station_code),
        config.weather_ttl,
    );

    let source = match &config.debug_flight_path {
        Some(path) => {
            tracing::warn!("live flight feed disabled, using fixed record from {}", path.display());
            FlightSource::Fixed(reference::load_debug_flight(path)?)
        }
        None => FlightSource::Live(Arc::new(FlightRadarClient::new(
            &config.flight_api_url,
            &config.flight_api_token,
            &config.flight_api_version,
            &config.search_bounds,
            &config.airport_code,
            config.altitude_ceiling_ft,
        ))),
    };
    let flights = FlightFeed::new(source, FeedGate::new(config.flight_ttl));

    let tracker = FlightTracker::new(config.descent_rate_fpm, config.touchdown_elevation_ft)
        .with_reset_floor(config.reset_floor_ft);

    let initial = snapshot::idle_snapshot(
        None,
        Utc::now(),
        &config.airport_code,
        &config.default_arrival_city,
        &logos,
    );
    let state = Arc::new(AppState::new(initial));

    let kiosk = Kiosk::new(
        weather,
        flights,
        tracker,
        airports,
        logos,
        config.airport_code.clone(),
        config.default_arrival_city.clone(),
    );
    tokio::spawn(run_tick_loop(state.clone(), kiosk, config.tick_interval));

    // Build the app
    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
