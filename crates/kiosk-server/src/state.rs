//! Shared state between the tick loop and the API readers.

use std::sync::{Arc, RwLock};

use kiosk_core::DisplaySnapshot;

/// Holds the latest display snapshot. The tick loop is the only
/// writer; API handlers take cheap read clones of the Arc.
pub struct AppState {
    snapshot: RwLock<Arc<DisplaySnapshot>>,
}

impl AppState {
    pub fn new(initial: DisplaySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(initial)),
        }
    }

    /// Swap in a fully-built snapshot; readers never observe a
    /// partial update.
    pub fn publish(&self, snapshot: DisplaySnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.snapshot.write() {
            Ok(mut slot) => *slot = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    pub fn current(&self) -> Arc<DisplaySnapshot> {
        match self.snapshot.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
