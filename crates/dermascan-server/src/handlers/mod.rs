//! HTTP route handlers for the dermascan server.

pub mod predict;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
