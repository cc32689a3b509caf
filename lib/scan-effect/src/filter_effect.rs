use crate::{
    Effect, ImageEffectResult, PixelImage,
    base_effect::luma,
    pixel_image::{B, G, R},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, RgbImage};

/// Sepia mixing matrix. Rows produce B', G', R'; columns weight B, G, R.
pub const SEPIA_KERNEL: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Sepia tone built from the luma of the source image.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SepiaConfig {
    #[derivative(Default(value = "SEPIA_KERNEL"))]
    kernel: [[f32; 3]; 3],
}

impl SepiaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixes one (B, G, R) triple, rounding and clamping each output to [0, 255].
    pub fn mix(&self, bgr: [u8; 3]) -> [u8; 3] {
        let input = bgr.map(|v| v as f32);
        self.kernel.map(|row| {
            let v: f32 = row.iter().zip(input.iter()).map(|(w, s)| w * s).sum();
            v.round_ties_even().clamp(0.0, 255.0) as u8
        })
    }
}

impl Effect for SepiaConfig {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        let gray = luma(image);

        let sepia = RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            let g = gray.get_pixel(x, y)[0];
            let [b, g, r] = self.mix([g, g, g]);

            let mut px = Rgb([0, 0, 0]);
            px[B] = b;
            px[G] = g;
            px[R] = r;
            px
        });

        Ok(PixelImage::Color(sepia))
    }
}
