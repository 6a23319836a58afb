//! Decoding and normalization of uploaded images into model input tensors.

use image::imageops::FilterType;
use thiserror::Error;
use tract_onnx::prelude::tract_ndarray::Array4;

/// Side length of the square input the model was trained on.
pub const INPUT_SIDE: u32 = 224;

/// Errors from image preprocessing.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("empty image payload")]
    EmptyInput,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Normalized model input: shape `[1, 224, 224, 3]`, f32 values in `[0, 1]`.
///
/// Transient by design: produced here, consumed by the classifier, dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor(Array4<f32>);

impl ImageTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }

    pub fn into_array(self) -> Array4<f32> {
        self.0
    }
}

/// Decodes raw image bytes into a normalized [`ImageTensor`].
///
/// Pipeline: decode (JPEG/PNG and anything else the decoder recognizes) →
/// bilinear resize to 224×224 → 3-channel RGB → f32 scaled by 1/255 →
/// leading batch dimension. Deterministic for identical input bytes; never
/// returns a partial tensor.
pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor, PreprocessError> {
    if bytes.is_empty() {
        return Err(PreprocessError::EmptyInput);
    }

    let decoded = image::load_from_memory(bytes)?;
    // Triangle is the bilinear filter in the image crate.
    let resized = decoded
        .resize_exact(INPUT_SIDE, INPUT_SIDE, FilterType::Triangle)
        .to_rgb8();

    let side = INPUT_SIDE as usize;
    let tensor = Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        f32::from(resized.get_pixel(x as u32, y as u32)[c]) / 255.0
    });

    Ok(ImageTensor(tensor))
}
