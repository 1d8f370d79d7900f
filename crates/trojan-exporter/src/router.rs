//! Axum router wiring.
//!
//! `/metrics` serves the exporter's own metrics; the configurable scrape
//! path (default `/scrape`) runs one upstream collection per request.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let scrape_path = state.cfg().metrics_path.clone();
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route(&scrape_path, get(ops::scrape))
        .with_state(state)
}
