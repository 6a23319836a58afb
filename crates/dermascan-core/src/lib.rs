//! Core domain types for dermascan.
//!
//! This crate provides the types shared across the dermascan service:
//!
//! - [`Verdict`] — the binary classification outcome and its decision rule
//! - [`PredictionRecord`] — the persisted result of one prediction
//!
//! # Example
//!
//! ```rust
//! use dermascan_core::{PredictionRecord, Verdict};
//!
//! let verdict = Verdict::from_score(0.91);
//! assert_eq!(verdict, Verdict::Cancer);
//!
//! let record = PredictionRecord::new(verdict);
//! assert_eq!(record.suggestion, "see a doctor promptly");
//! ```

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confidence at or above which an image is classified as cancer.
///
/// Inclusive on the cancer side: a score of exactly 0.58 is `Cancer`.
pub const DECISION_THRESHOLD: f32 = 0.58;

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Cancer,
    #[serde(rename = "Non-cancer")]
    NonCancer,
}

impl Verdict {
    /// Derives the verdict from the model's confidence score.
    pub fn from_score(score: f32) -> Self {
        if score >= DECISION_THRESHOLD {
            Verdict::Cancer
        } else {
            Verdict::NonCancer
        }
    }

    /// The advisory text for this verdict. Fully determined by the verdict;
    /// never settable independently.
    pub fn suggestion(self) -> &'static str {
        match self {
            Verdict::Cancer => "see a doctor promptly",
            Verdict::NonCancer => "no cancer indicators detected",
        }
    }

    /// The wire/storage label for this verdict.
    pub fn as_label(self) -> &'static str {
        match self {
            Verdict::Cancer => "Cancer",
            Verdict::NonCancer => "Non-cancer",
        }
    }

    /// Parses a stored label back into a verdict.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Cancer" => Some(Verdict::Cancer),
            "Non-cancer" => Some(Verdict::NonCancer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// The persisted outcome of one classification request.
///
/// Records are append-only: once written they are never updated or deleted
/// by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique identifier, generated per prediction.
    pub id: String,
    /// Classification outcome.
    pub result: Verdict,
    /// Advisory text derived from `result`.
    pub suggestion: String,
    /// Creation timestamp, ISO-8601 UTC.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl PredictionRecord {
    /// Builds a record for a verdict with a fresh id and the current time.
    pub fn new(result: Verdict) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            result,
            suggestion: result.suggestion().to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
