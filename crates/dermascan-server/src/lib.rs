//! HTTP server and prediction pipeline for dermascan.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use dermascan_model::Classifier;
use dermascan_store::PredictionStore;

/// Maximum accepted upload size in bytes. Enforced by the pipeline's
/// validation gate, which maps violations to 413.
pub const MAX_UPLOAD_BYTES: usize = 1_000_000;

/// Shared state for all request handlers.
///
/// The classifier is loaded once at startup and shared read-only across
/// concurrent requests. The store is behind a trait so tests can inject a
/// failing one.
pub struct ServerState {
    pub classifier: Arc<dyn Classifier>,
    pub store: Arc<dyn PredictionStore>,
    pub upload_dir: PathBuf,
}

/// Builds the application router with CORS, request tracing and body limit.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    // The framework body cap is lifted on /predict so every oversized upload
    // reaches the pipeline's own size gate and gets the 413 contract instead
    // of a framework-level read failure.
    Router::new()
        .route(
            "/predict",
            post(handlers::predict::predict).layer(DefaultBodyLimit::disable()),
        )
        .route("/predict/histories", get(handlers::predict::histories))
        .route("/health", get(handlers::health))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
