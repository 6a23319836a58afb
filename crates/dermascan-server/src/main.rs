use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use dermascan_model::OnnxClassifier;
use dermascan_server::config::ServerConfig;
use dermascan_server::{build_router, ServerState};
use dermascan_store::HistoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env();

    // The process must not accept requests without a loaded model; any
    // failure here aborts startup.
    let classifier = OnnxClassifier::load(&config.model_source).await?;
    let store = HistoryStore::open(&config.db_path)?;

    let state = Arc::new(ServerState {
        classifier: Arc::new(classifier),
        store: Arc::new(store),
        upload_dir: config.upload_dir.into(),
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
