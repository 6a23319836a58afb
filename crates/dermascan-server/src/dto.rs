//! Response envelopes for the HTTP surface.

use serde::Serialize;

use dermascan_core::PredictionRecord;

/// Success envelope for POST /predict.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: PredictionRecord,
}

impl PredictResponse {
    pub fn success(record: PredictionRecord) -> Self {
        Self {
            status: "success",
            message: "Model is predicted successfully",
            data: record,
        }
    }
}

/// One entry in the histories listing: the record id alongside the full
/// record (which repeats the id).
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub history: PredictionRecord,
}

/// Success envelope for GET /predict/histories.
#[derive(Debug, Serialize)]
pub struct HistoriesResponse {
    pub status: &'static str,
    pub data: Vec<HistoryEntry>,
}
