//! Model handle: loads the classifier artifact once and runs inference.

use std::io::Cursor;

use thiserror::Error;
use tracing::{debug, info};
use tract_onnx::prelude::*;

use crate::preprocess::ImageTensor;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Errors from model loading or inference.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to fetch model artifact: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load model: {0}")]
    Load(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A binary image classifier producing a confidence score for the positive
/// class.
///
/// The tensor is taken by value: each preprocessed input is consumed by
/// exactly one inference call.
pub trait Classifier: Send + Sync {
    fn predict(&self, tensor: ImageTensor) -> Result<f32, ClassifierError>;
}

/// Classifier backed by a tract-onnx runnable plan.
///
/// The plan holds no per-call mutable state and runs through `&self`, so one
/// instance is shared read-only across concurrent requests.
pub struct OnnxClassifier {
    plan: Plan,
}

impl OnnxClassifier {
    /// Loads the model artifact from an `http(s)://` URL or a local path.
    ///
    /// Called once at startup; a failure here is fatal and must abort the
    /// process before it accepts requests.
    pub async fn load(source: &str) -> Result<Self, ClassifierError> {
        let bytes = if source.starts_with("http://") || source.starts_with("https://") {
            info!("Fetching model artifact from {}", source);
            reqwest::get(source)
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec()
        } else {
            info!("Reading model artifact from {}", source);
            tokio::fs::read(source).await?
        };
        Self::from_bytes(&bytes)
    }

    /// Builds a runnable plan from an in-memory ONNX artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let plan =
            build_plan(bytes).map_err(|e| ClassifierError::Load(e.to_string()))?;
        info!("Model loaded ({} bytes)", bytes.len());
        Ok(Self { plan })
    }
}

fn build_plan(bytes: &[u8]) -> TractResult<Plan> {
    tract_onnx::onnx()
        .model_for_read(&mut Cursor::new(bytes))?
        .with_input_fact(
            0,
            InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 224, 224, 3)),
        )?
        .into_optimized()?
        .into_runnable()
}

impl Classifier for OnnxClassifier {
    fn predict(&self, tensor: ImageTensor) -> Result<f32, ClassifierError> {
        let input: Tensor = tensor.into_array().into();
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let score = view
            .iter()
            .copied()
            .next()
            .ok_or_else(|| ClassifierError::Inference("model produced no output".into()))?;

        debug!("Raw prediction score: {}", score);
        Ok(score)
    }
}
