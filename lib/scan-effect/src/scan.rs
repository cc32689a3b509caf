//! Entry point for an upload: validate the file name, decode, apply the
//! requested effect and re-encode the result as JPEG.

use crate::{Adjustment, Effect, ImageEffect, ImageEffectError, PixelImage, loader};
use derivative::Derivative;
use derive_setters::Setters;
use image::{ImageEncoder, codecs::jpeg::JpegEncoder};
use std::{
    panic::{self, AssertUnwindSafe},
    path::Path,
};
use uuid::Uuid;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("Invalid file type {0}. Upload PNG or JPG images.")]
    UnsupportedExtension(String),
    #[error("Failed to read uploaded image {0}")]
    Decode(String),
    #[error("Failed to process image: {0}")]
    Processing(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

impl From<ImageEffectError> for ScanError {
    fn from(e: ImageEffectError) -> Self {
        match e {
            ImageEffectError::Processing(msg) => ScanError::Processing(msg),
            ImageEffectError::InvalidParameter(msg) => ScanError::InvalidParameter(msg),
        }
    }
}

/// Whether `filename` ends with an allowed image suffix, ignoring case.
pub fn is_supported_extension(filename: &str) -> bool {
    let name = filename.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// A fresh `processed_<hex>.jpg` name for a result image.
pub fn output_file_name() -> String {
    format!("processed_{}.jpg", Uuid::new_v4().simple())
}

/// A collision-free `<hex>_<original>` name for storing an upload.
pub fn stored_upload_name(original: &str) -> String {
    format!("{}_{original}", Uuid::new_v4().simple())
}

/// Baseline JPEG encoding of a color or single-channel image.
pub fn encode_jpeg(image: &PixelImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image.color_type(),
    )?;
    Ok(buf)
}

/// One effect request: effect, contrast/brightness and output quality.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ScanRequest {
    #[derivative(Default(value = "ImageEffect::Grayscale"))]
    effect: ImageEffect,

    #[derivative(Default(value = "1.0"))]
    contrast: f32,

    #[derivative(Default(value = "0"))]
    brightness: i32,

    #[derivative(Default(value = "DEFAULT_JPEG_QUALITY"))]
    quality: u8,
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the effect by name, falling back to grayscale for unknown names.
    pub fn with_effect_name(self, name: &str) -> Self {
        self.with_effect(ImageEffect::from_name(name))
    }

    pub fn effect(&self) -> ImageEffect {
        self.effect
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn adjustment(&self) -> Adjustment {
        Adjustment::new(self.contrast, self.brightness)
    }

    /// Applies the effect to an already decoded image. Panics raised while
    /// processing are reported as `ScanError::Processing`.
    pub fn render(&self, image: &PixelImage) -> Result<PixelImage> {
        let adjust = self.adjustment();
        adjust.validate()?;

        match panic::catch_unwind(AssertUnwindSafe(|| self.effect.apply(image, &adjust))) {
            Ok(result) => Ok(result?),
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(ScanError::Processing(msg))
            }
        }
    }

    /// Processes uploaded bytes named `filename` and returns the JPEG result.
    pub fn process_bytes(&self, filename: &str, bytes: &[u8]) -> Result<Vec<u8>> {
        if !is_supported_extension(filename) {
            return Err(ScanError::UnsupportedExtension(filename.to_string()));
        }

        let image = loader::decode(bytes).ok_or_else(|| ScanError::Decode(filename.to_string()))?;
        self.encode(&image)
    }

    /// Processes the image file at `path` and returns the JPEG result.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_supported_extension(&filename) {
            return Err(ScanError::UnsupportedExtension(filename));
        }

        let image = loader::load(path).ok_or(ScanError::Decode(filename))?;
        self.encode(&image)
    }

    fn encode(&self, image: &PixelImage) -> Result<Vec<u8>> {
        let processed = self.render(image)?;
        log::debug!(
            "applied {} ({}x{}, contrast {}, brightness {})",
            self.effect,
            processed.width(),
            processed.height(),
            self.contrast,
            self.brightness
        );
        encode_jpeg(&processed, self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allow_list() {
        for name in ["a.png", "a.jpg", "a.jpeg", "B.PNG", "photo.JpEg", ".png"] {
            assert!(is_supported_extension(name), "{name}");
        }
        for name in ["a.gif", "a.bmp", "png", "a.png.txt", "", "a.jpe"] {
            assert!(!is_supported_extension(name), "{name}");
        }
    }

    #[test]
    fn test_generated_names() {
        let name = output_file_name();
        assert!(name.starts_with("processed_"));
        assert!(name.ends_with(".jpg"));

        let hex = &name["processed_".len()..name.len() - ".jpg".len()];
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(output_file_name(), name);

        let stored = stored_upload_name("cat.png");
        assert_eq!(stored.len(), 32 + "_cat.png".len());
        assert!(stored.ends_with("_cat.png"));
    }

    #[test]
    fn test_request_defaults() {
        let req = ScanRequest::new();
        assert_eq!(req.effect(), ImageEffect::Grayscale);
        assert_eq!(req.quality(), DEFAULT_JPEG_QUALITY);
        assert!(req.adjustment().is_identity());

        let req = req.with_effect_name("sketch").with_brightness(4);
        assert_eq!(req.effect(), ImageEffect::Sketch);
        assert_eq!(req.adjustment().brightness(), 4);
    }

    #[test]
    fn test_effect_errors_convert() {
        let e: ScanError = ImageEffectError::InvalidParameter("x".into()).into();
        assert!(matches!(e, ScanError::InvalidParameter(_)));
        let e: ScanError = ImageEffectError::Processing("y".into()).into();
        assert!(matches!(e, ScanError::Processing(_)));
    }
}
