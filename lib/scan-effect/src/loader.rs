//! Decoding of uploaded PNG/JPEG files into color pixel arrays.
//!
//! Untrusted uploads fail to decode routinely, so both entry points return
//! `None` instead of an error and log the reason.

use crate::PixelImage;
use image::ImageReader;
use log::warn;
use std::{fs, io::Cursor, path::Path};

/// Reads and decodes the image at `path` into a 3-channel color image.
pub fn load(path: impl AsRef<Path>) -> Option<PixelImage> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => decode(&bytes),
        Err(e) => {
            warn!("read image {} failed: {e}", path.display());
            None
        }
    }
}

/// Decodes an encoded image held in memory into a 3-channel color image.
pub fn decode(bytes: &[u8]) -> Option<PixelImage> {
    if bytes.is_empty() {
        warn!("decode image failed: empty input");
        return None;
    }

    let reader = match ImageReader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => {
            warn!("guess image format failed: {e}");
            return None;
        }
    };

    match reader.decode() {
        Ok(img) if img.width() > 0 && img.height() > 0 => Some(PixelImage::Color(img.to_rgb8())),
        Ok(img) => {
            warn!("decoded image is empty: {}x{}", img.width(), img.height());
            None
        }
        Err(e) => {
            warn!("decode image failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, RgbaImage};

    fn encode(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let src = RgbImage::from_fn(5, 4, |x, y| Rgb([x as u8 * 40, y as u8 * 50, 7]));
        let bytes = encode(image::DynamicImage::ImageRgb8(src.clone()), ImageFormat::Png);

        let img = decode(&bytes).unwrap();
        assert_eq!(img, PixelImage::Color(src));
    }

    #[test]
    fn test_decode_drops_alpha() {
        let src = RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 0]));
        let bytes = encode(image::DynamicImage::ImageRgba8(src), ImageFormat::Png);

        let img = decode(&bytes).unwrap();
        assert_eq!(img.channels(), 3);
        assert_eq!(&img.as_raw()[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_decode_jpeg_keeps_dimensions() {
        let src = RgbImage::from_pixel(17, 9, Rgb([128, 64, 32]));
        let bytes = encode(image::DynamicImage::ImageRgb8(src), ImageFormat::Jpeg);

        let img = decode(&bytes).unwrap();
        assert_eq!(img.dimensions(), (17, 9));
        assert_eq!(img.channels(), 3);
    }

    #[test]
    fn test_decode_failures() {
        assert!(decode(&[]).is_none());
        assert!(decode(b"definitely not an image").is_none());

        let mut truncated = encode(
            image::DynamicImage::ImageRgb8(RgbImage::new(8, 8)),
            ImageFormat::Png,
        );
        truncated.truncate(truncated.len() / 2);
        assert!(decode(&truncated).is_none());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load("/definitely/not/here.png").is_none());
    }
}
