use crate::{Effect, ImageEffectResult, PixelImage, base_effect::luma, blur::gaussian_blur};
use image::{GrayImage, Luma};

/// Side of the square Gaussian kernel used to soften the inverted luma.
pub const SKETCH_KERNEL_SIZE: usize = 21;

/// Colour dodge of `base` by `blend`: `base * 256 / (255 - blend)`, saturated.
/// A zero divisor saturates to 255.
pub fn dodge(base: u8, blend: u8) -> u8 {
    let divisor = 255 - blend as u32;
    if divisor == 0 {
        return 255;
    }

    let v = base as f64 * 256.0 / divisor as f64;
    v.round_ties_even().min(255.0) as u8
}

/// Pencil sketch from the luma of the source image.
#[derive(Debug, Clone, Copy, Default)]
pub struct SketchConfig;

impl SketchConfig {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for SketchConfig {
    fn render(&self, image: &PixelImage) -> ImageEffectResult<PixelImage> {
        let gray = luma(image);

        let mut inverted = gray.clone();
        inverted.iter_mut().for_each(|s| *s = 255 - *s);
        let blurred = gaussian_blur(&inverted, SKETCH_KERNEL_SIZE);

        let sketch = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            Luma([dodge(gray.get_pixel(x, y)[0], blurred.get_pixel(x, y)[0])])
        });

        Ok(PixelImage::Gray(sketch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Adjustment;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_dodge() {
        assert_eq!(dodge(0, 0), 0);
        assert_eq!(dodge(100, 0), 100);
        // 100 * 256 / 155 = 165.16
        assert_eq!(dodge(100, 100), 165);
        assert_eq!(dodge(200, 100), 255);
        assert_eq!(dodge(0, 255), 255);
        assert_eq!(dodge(10, 255), 255);
    }

    #[test]
    fn test_flat_image_saturates() {
        for v in [0u8, 1, 90, 255] {
            let image = PixelImage::Color(RgbImage::from_pixel(25, 25, Rgb([v, v, v])));
            let out = SketchConfig::new().render(&image).unwrap();
            assert_eq!(out.channels(), 1);
            assert!(out.as_raw().iter().all(|&s| s == 255), "value {v}");
        }
    }

    #[test]
    fn test_dark_square_edges() {
        // Dark square on white background: pixels just inside the dark area are
        // darker than the saturated background.
        let image = PixelImage::Color(RgbImage::from_fn(60, 60, |x, y| {
            if (20..40).contains(&x) && (20..40).contains(&y) {
                Rgb([40, 40, 40])
            } else {
                Rgb([230, 230, 230])
            }
        }));
        let out = SketchConfig::new()
            .apply(&image, &Adjustment::default())
            .unwrap();

        let PixelImage::Gray(gray) = &out else {
            panic!("sketch must be single-channel");
        };
        assert_eq!(gray.get_pixel(2, 2)[0], 255);
        assert_eq!(gray.get_pixel(19, 30)[0], 255);

        // Blurred complement 131 on the edge: 40 * 256 / 124 = 82.6
        assert_eq!(gray.get_pixel(20, 30)[0], 83);
        assert_eq!(gray.get_pixel(25, 25)[0], 168);
        assert_eq!(gray.get_pixel(30, 30)[0], 250);
    }

    #[test]
    fn test_brightness_after_dodge() {
        let image = PixelImage::Color(RgbImage::from_pixel(8, 8, Rgb([120, 120, 120])));
        let out = SketchConfig::new()
            .apply(&image, &Adjustment::new(1.0, -55))
            .unwrap();
        assert!(out.as_raw().iter().all(|&s| s == 200));
    }
}
