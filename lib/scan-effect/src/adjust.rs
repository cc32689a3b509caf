//! Contrast and brightness normalization shared by every effect.

use crate::{ImageEffectError, ImageEffectResult, PixelImage};
use derivative::Derivative;
use derive_setters::Setters;

/// Linear gain and offset applied after an effect has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct Adjustment {
    #[derivative(Default(value = "1.0"))]
    contrast: f32,
    #[derivative(Default(value = "0"))]
    brightness: i32,
}

impl Adjustment {
    pub fn new(contrast: f32, brightness: i32) -> Self {
        Self {
            contrast,
            brightness,
        }
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    pub fn is_identity(&self) -> bool {
        self.contrast == 1.0 && self.brightness == 0
    }

    pub fn validate(&self) -> ImageEffectResult<()> {
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "contrast must be a positive number, got {}",
                self.contrast
            )));
        }
        Ok(())
    }

    /// Saturating `round(v * contrast + brightness)` for one sample.
    pub fn adjust_sample(&self, value: u8) -> u8 {
        let v = value as f64 * self.contrast as f64 + self.brightness as f64;
        v.round_ties_even().clamp(0.0, 255.0) as u8
    }

    /// The output of `adjust_sample` for every possible input sample.
    pub fn lookup_table(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (value, slot) in lut.iter_mut().enumerate() {
            *slot = self.adjust_sample(value as u8);
        }
        lut
    }

    /// Applies the adjustment to every channel of `image`, returning a new image.
    pub fn normalize(&self, image: &PixelImage) -> PixelImage {
        let lut = self.lookup_table();
        image.map_samples(|s| lut[s as usize])
    }
}

pub fn normalize(image: &PixelImage, contrast: f32, brightness: i32) -> PixelImage {
    Adjustment::new(contrast, brightness).normalize(image)
}
