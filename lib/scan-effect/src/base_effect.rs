use crate::{
    Effect, ImageEffectResult, PixelImage,
    pixel_image::{B, G, R},
};
use image::{GrayImage, Luma};

// BT.601 luma weights in 14-bit fixed point, summing to 1 << 14.
const LUMA_SHIFT: u32 = 14;
const LUMA_B: u32 = 1868;
const LUMA_G: u32 = 9617;
const LUMA_R: u32 = 4899;

/// Luma of one pixel: `0.114*B + 0.587*G + 0.299*R`, rounded to nearest.
pub fn luma_of(b: u8, g: u8, r: u8) -> u8 {
    let sum = b as u32 * LUMA_B + g as u32 * LUMA_G + r as u32 * LUMA_R;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Single-channel luma of `image`. A single-channel input is copied as-is.
pub fn luma(image: &PixelImage) -> GrayImage {
    match image {
        PixelImage::Color(img) => GrayImage::from_fn(img.width(), img.height(), |x, y| {
            let px = img.get_pixel(x, y);
            Luma([luma_of(px[B], px[G], px[R])])
        }),
        PixelImage::Gray(img) => img.clone(),
    }
}

/// Per-sample complement `255 - v`, keeping the channel count.
pub fn invert_raw(image: &PixelImage) -> PixelImage {
    image.map_samples(|s| 255 - s)
}

/// Luma conversion to a single channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl Effect for Grayscale {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        Ok(PixelImage::Gray(luma(image)))
    }
}

/// Color inversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Effect for Invert {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        Ok(invert_raw(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Adjustment;
    use image::{Rgb, RgbImage};

    fn color(w: u32, h: u32, b: u8, g: u8, r: u8) -> PixelImage {
        let mut px = Rgb([0, 0, 0]);
        px[B] = b;
        px[G] = g;
        px[R] = r;
        PixelImage::Color(RgbImage::from_pixel(w, h, px))
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma_of(0, 0, 0), 0);
        assert_eq!(luma_of(255, 255, 255), 255);
        assert_eq!(luma_of(127, 127, 127), 127);
        // Pure channels: 0.114 * 255, 0.587 * 255, 0.299 * 255
        assert_eq!(luma_of(255, 0, 0), 29);
        assert_eq!(luma_of(0, 255, 0), 150);
        assert_eq!(luma_of(0, 0, 255), 76);
    }

    #[test]
    fn test_grayscale_has_one_channel() {
        let out = Grayscale
            .apply(&color(5, 3, 10, 200, 90), &Adjustment::default())
            .unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.dimensions(), (5, 3));

        let gray = Grayscale.render(&out).unwrap();
        assert_eq!(gray, out);
    }

    #[test]
    fn test_invert_black_is_white() {
        let out = Invert
            .apply(&color(2, 2, 0, 0, 0), &Adjustment::default())
            .unwrap();
        assert_eq!(out.channels(), 3);
        assert!(out.as_raw().iter().all(|&s| s == 255));
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let src = PixelImage::Color(RgbImage::from_fn(7, 4, |x, y| {
            Rgb([(x * 30) as u8, (y * 60) as u8, (x * y) as u8])
        }));
        assert_eq!(invert_raw(&invert_raw(&src)), src);
    }

    #[test]
    fn test_invert_does_not_touch_input() {
        let src = color(2, 2, 1, 2, 3);
        let before = src.clone();
        let _ = Invert.render(&src).unwrap();
        assert_eq!(src, before);
    }
}
