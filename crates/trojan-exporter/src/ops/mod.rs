//! HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : exporter self metrics, Prometheus text format
//! - scrape path: Trojan-Go user metrics, Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::exporter::family;

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics().record_request("/healthz", StatusCode::OK.as_u16());
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    // Count first so the response includes this request.
    state.metrics().record_request("/metrics", StatusCode::OK.as_u16());
    match state.metrics().render() {
        Ok(body) => text(body),
        Err(e) => {
            tracing::warn!(error = %e, "rendering self metrics failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// 200 even when the upstream fails: that only shrinks the payload.
pub async fn scrape(State(state): State<AppState>) -> Response {
    let families = state.exporter().collect().await;
    let path = state.cfg().metrics_path.as_str();
    match family::encode(&families) {
        Ok(body) => {
            state.metrics().record_request(path, StatusCode::OK.as_u16());
            text(body)
        }
        Err(e) => {
            tracing::warn!(error = %e, "encoding scrape result failed");
            state
                .metrics()
                .record_request(path, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn text(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, family::CONTENT_TYPE)],
        body,
    )
        .into_response()
}
