use crate::{Effect, ImageEffectResult, PixelImage, base_effect::luma};
use derivative::Derivative;
use derive_setters::Setters;
use imageproc::contrast::{ThresholdType, threshold};

/// Binary black-and-white conversion of the luma channel.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ThresholdConfig {
    /// Samples strictly above this value become 255, the rest 0.
    #[derivative(Default(value = "127"))]
    threshold: u8,
}

impl ThresholdConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ThresholdConfig {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        let gray = luma(image);
        Ok(PixelImage::Gray(threshold(
            &gray,
            self.threshold,
            ThresholdType::Binary,
        )))
    }
}
