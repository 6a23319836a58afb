//! Environment-driven server configuration.

use std::env;

const DEFAULT_MODEL_SOURCE: &str =
    "https://storage.googleapis.com/dermascan-artifacts/models/model.onnx";

/// Server configuration, read from the environment (after `dotenvy`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (`PORT`, default 8080).
    pub port: u16,
    /// Model artifact URL or local path (`MODEL_SOURCE`).
    pub model_source: String,
    /// SQLite database path (`DB_PATH`).
    pub db_path: String,
    /// Directory for spooled uploads (`UPLOAD_DIR`).
    pub upload_dir: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model_source: env::var("MODEL_SOURCE")
                .unwrap_or_else(|_| DEFAULT_MODEL_SOURCE.into()),
            db_path: env::var("DB_PATH").unwrap_or_else(|_| "data/predictions.db".into()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        }
    }
}
