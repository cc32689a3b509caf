//! Dense 8-bit images flowing through the effect pipeline.
//!
//! Color images are kept in `image::RgbImage` buffers. The samples of a pixel
//! are addressed through the [`B`], [`G`] and [`R`] indices so that every
//! formula names the channel it weights. [`PixelImage::from_bgr_raw`] and
//! [`PixelImage::to_bgr_raw`] exchange interleaved blue-green-red buffers.

use image::{DynamicImage, ExtendedColorType, GrayImage, RgbImage};

/// Index of the blue sample inside a color pixel.
pub const B: usize = 2;
/// Index of the green sample inside a color pixel.
pub const G: usize = 1;
/// Index of the red sample inside a color pixel.
pub const R: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelImage {
    Color(RgbImage),
    Gray(GrayImage),
}

impl PixelImage {
    /// Builds a color image from interleaved blue-green-red samples.
    pub fn from_bgr_raw(width: u32, height: u32, bgr: &[u8]) -> Option<Self> {
        if bgr.len() != width as usize * height as usize * 3 {
            return None;
        }

        let mut raw = Vec::with_capacity(bgr.len());
        for px in bgr.chunks_exact(3) {
            raw.extend_from_slice(&[px[2], px[1], px[0]]);
        }

        RgbImage::from_raw(width, height, raw).map(PixelImage::Color)
    }

    /// Interleaved blue-green-red samples for color images, or the plain
    /// samples of a single-channel image.
    pub fn to_bgr_raw(&self) -> Vec<u8> {
        match self {
            PixelImage::Color(img) => img
                .pixels()
                .flat_map(|px| [px[B], px[G], px[R]])
                .collect(),
            PixelImage::Gray(img) => img.as_raw().clone(),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            PixelImage::Color(img) => img.width(),
            PixelImage::Gray(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelImage::Color(img) => img.height(),
            PixelImage::Gray(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn channels(&self) -> u8 {
        match self {
            PixelImage::Color(_) => 3,
            PixelImage::Gray(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn color_type(&self) -> ExtendedColorType {
        match self {
            PixelImage::Color(_) => ExtendedColorType::Rgb8,
            PixelImage::Gray(_) => ExtendedColorType::L8,
        }
    }

    /// Raw samples in storage order.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            PixelImage::Color(img) => img.as_raw(),
            PixelImage::Gray(img) => img.as_raw(),
        }
    }

    /// Returns a new image with `f` applied to every sample of every channel.
    pub fn map_samples(&self, f: impl Fn(u8) -> u8) -> Self {
        match self {
            PixelImage::Color(img) => {
                let mut out = img.clone();
                out.iter_mut().for_each(|s| *s = f(*s));
                PixelImage::Color(out)
            }
            PixelImage::Gray(img) => {
                let mut out = img.clone();
                out.iter_mut().for_each(|s| *s = f(*s));
                PixelImage::Gray(out)
            }
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            PixelImage::Color(img) => DynamicImage::ImageRgb8(img),
            PixelImage::Gray(img) => DynamicImage::ImageLuma8(img),
        }
    }
}
