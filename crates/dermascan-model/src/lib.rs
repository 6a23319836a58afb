//! Image preprocessing and model inference for dermascan.
//!
//! Two pieces live here:
//!
//! - [`preprocess`] — decodes uploaded image bytes into the normalized
//!   `[1, 224, 224, 3]` tensor the classifier expects
//! - [`Classifier`] / [`OnnxClassifier`] — the model handle, loaded once at
//!   startup and shared read-only across requests

pub mod classifier;
pub mod preprocess;

pub use classifier::{Classifier, ClassifierError, OnnxClassifier};
pub use preprocess::{preprocess, ImageTensor, PreprocessError};
