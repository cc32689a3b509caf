pub mod adjust;
pub mod base_effect;
pub mod blur;
pub mod filter_effect;
pub mod loader;
pub mod monochrome_effect;
pub mod pixel_image;
pub mod scan;
pub mod stylized_effect;

pub use adjust::{Adjustment, normalize};
pub use loader::{decode, load};
pub use pixel_image::PixelImage;
pub use scan::{ScanError, ScanRequest};

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Image processing error: {0}")]
    Processing(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub trait Effect {
    /// Renders the effect without the contrast/brightness post-step.
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage>;

    /// Renders the effect and normalizes the result with `adjust`.
    fn apply(&self, image: &PixelImage, adjust: &Adjustment) -> ImageEffectResult<PixelImage> {
        let rendered = self.render(image)?;
        Ok(adjust.normalize(&rendered))
    }
}

/// The closed set of effects a scan can request.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ImageEffect {
    #[default]
    Grayscale,
    Sepia,
    Invert,
    Sketch,
    Threshold,
}

impl ImageEffect {
    /// Parses a case-sensitive effect name. Unknown names fall back to `Grayscale`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::debug!("unknown effect `{name}`, falling back to grayscale");
            ImageEffect::Grayscale
        })
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn all_effects() -> Vec<ImageEffect> {
        ImageEffect::iter().collect()
    }
}

impl Effect for ImageEffect {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        if image.is_empty() {
            return Err(ImageEffectError::Processing(format!(
                "cannot apply {self} to an empty {}x{} image",
                image.width(),
                image.height()
            )));
        }

        match self {
            ImageEffect::Grayscale => base_effect::Grayscale.render(image),
            ImageEffect::Invert => base_effect::Invert.render(image),
            ImageEffect::Sepia => filter_effect::SepiaConfig::new().render(image),
            ImageEffect::Sketch => stylized_effect::SketchConfig::new().render(image),
            ImageEffect::Threshold => monochrome_effect::ThresholdConfig::new().render(image),
        }
    }
}
