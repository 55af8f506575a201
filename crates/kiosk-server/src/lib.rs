//! Shared library surface for kiosk server components and tests.

pub mod api;
pub mod config;
pub mod feeds;
pub mod gate;
pub mod kiosk;
pub mod loops;
pub mod reference;
pub mod snapshot;
pub mod state;
