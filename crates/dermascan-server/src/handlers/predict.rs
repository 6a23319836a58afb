//! Prediction HTTP handlers.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::dto::{HistoriesResponse, HistoryEntry, PredictResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// POST /predict — classify one uploaded image.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PredictResponse>), AppError> {
    let mut bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Prediction(format!("malformed multipart body: {e}")))?
    {
        // Only an actual file part counts as the upload; a plain text field
        // (even one named "image") does not.
        if field.file_name().is_some() {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Prediction(format!("failed to read upload: {e}")))?;
            bytes = Some(data);
            break;
        }
    }
    let bytes = bytes.ok_or(AppError::MissingFile)?;

    let record = services::predict::run(&state, &bytes).await.map_err(|e| {
        error!("Prediction request failed: {}", e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(PredictResponse::success(record))))
}

/// GET /predict/histories — list every stored prediction.
pub async fn histories(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<HistoriesResponse>, AppError> {
    let records = state.store.list_all().map_err(|e| {
        error!("Failed to list prediction histories: {}", e);
        AppError::HistoryRead(e.to_string())
    })?;

    let data = records
        .into_iter()
        .map(|record| HistoryEntry {
            id: record.id.clone(),
            history: record,
        })
        .collect();

    Ok(Json(HistoriesResponse {
        status: "success",
        data,
    }))
}
