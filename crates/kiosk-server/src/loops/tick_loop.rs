//! Fixed-interval tick driving the display state builder.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::interval;

use crate::kiosk::Kiosk;
use crate::state::AppState;

/// Run the display tick loop. All feed scheduling happens inside
/// `Kiosk::tick`; this loop only drives the cadence and publishes the
/// finished snapshot.
pub async fn run_tick_loop(state: Arc<AppState>, mut kiosk: Kiosk, tick: Duration) {
    let mut ticker = interval(tick);

    loop {
        ticker.tick().await;
        let snapshot = kiosk.tick(Instant::now(), Utc::now());
        state.publish(snapshot);
    }
}
