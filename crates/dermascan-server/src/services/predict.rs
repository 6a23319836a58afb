//! The prediction pipeline: validate → preprocess → infer → decide → persist.

use std::sync::Arc;

use tracing::info;

use dermascan_core::{PredictionRecord, Verdict};
use dermascan_model::preprocess;

use crate::error::AppError;
use crate::upload::TempUpload;
use crate::{ServerState, MAX_UPLOAD_BYTES};

/// Runs one prediction end to end and returns the persisted record.
///
/// The record is written to the store before this function returns, so a
/// success here always means the prediction is durably recorded. Each step
/// waits for its predecessor; the temp upload guard is dropped on every exit
/// path, deleting the spooled file.
pub async fn run(state: &ServerState, bytes: &[u8]) -> Result<PredictionRecord, AppError> {
    let upload = TempUpload::spool(&state.upload_dir, bytes)
        .map_err(|e| AppError::Prediction(format!("failed to spool upload: {e}")))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(bytes.len()));
    }

    let spooled = tokio::fs::read(upload.path())
        .await
        .map_err(|e| AppError::Prediction(format!("failed to read spooled upload: {e}")))?;
    let tensor = preprocess(&spooled).map_err(|e| AppError::Prediction(e.to_string()))?;

    let classifier = Arc::clone(&state.classifier);
    let score = tokio::task::spawn_blocking(move || classifier.predict(tensor))
        .await
        .map_err(|e| AppError::Prediction(format!("inference task failed: {e}")))?
        .map_err(|e| AppError::Prediction(e.to_string()))?;

    let verdict = Verdict::from_score(score);
    info!("Prediction scored {:.4} -> {}", score, verdict);

    let record = PredictionRecord::new(verdict);
    state
        .store
        .create(&record)
        .map_err(|e| AppError::Persistence(e.to_string()))?;

    Ok(record)
}
