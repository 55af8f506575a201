//! REST surface for the presentation layer.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use kiosk_core::DisplaySnapshot;

use crate::state::AppState;

/// Create the API router. The rendering layer polls the snapshot
/// endpoint once per frame; everything else about the screen is its
/// concern.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new().route("/v1/snapshot", get(get_snapshot))
}

async fn get_snapshot(State(state): State<Arc<AppState>>) -> Json<DisplaySnapshot> {
    Json((*state.current()).clone())
}
