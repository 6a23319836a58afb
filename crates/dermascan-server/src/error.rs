//! Application error types and Axum response conversion.
//!
//! Every pipeline failure is converted to a `{status:"fail", message}` body
//! here. Internal detail (the variant payloads) goes to the logs only; the
//! client sees a fixed message per failure class.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::MAX_UPLOAD_BYTES;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request carried no uploaded file field.
    #[error("no image file was uploaded")]
    MissingFile,

    /// The uploaded file exceeds the size limit.
    #[error("upload of {0} bytes exceeds limit")]
    PayloadTooLarge(usize),

    /// Decode, inference or any other failure while producing a prediction.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// The record could not be written before responding.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// The history listing could not be read.
    #[error("history read failed: {0}")]
    HistoryRead(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // Decode/inference/persistence failures keep the 400 contract of
            // the existing boundary rather than 500.
            AppError::Prediction(_) | AppError::Persistence(_) => StatusCode::BAD_REQUEST,
            AppError::HistoryRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never echoes internal detail.
    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "No image file was uploaded".into(),
            AppError::PayloadTooLarge(_) => format!(
                "Payload content length greater than maximum allowed: {}",
                MAX_UPLOAD_BYTES
            ),
            AppError::Prediction(_) | AppError::Persistence(_) => {
                "An error occurred while making the prediction".into()
            }
            AppError::HistoryRead(_) => {
                "An error occurred while fetching prediction histories".into()
            }
        }
    }
}

#[derive(Serialize)]
struct FailBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = FailBody {
            status: "fail",
            message: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_boundary_contract() {
        assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::PayloadTooLarge(2_000_000).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Prediction("decode".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Persistence("disk full".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::HistoryRead("locked".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_messages_do_not_leak_internal_detail() {
        let msg = AppError::Prediction("tract: invalid opset".into()).client_message();
        assert!(!msg.contains("tract"));

        let msg = AppError::Persistence("sqlite busy".into()).client_message();
        assert!(!msg.contains("sqlite"));
    }

    #[test]
    fn payload_message_names_the_limit() {
        let msg = AppError::PayloadTooLarge(2_000_000).client_message();
        assert!(msg.contains("1000000"));
    }
}
