/// Renders every scan effect over a generated gradient.
/// Results are written to tmp/<effect>_effect.jpg

use image::{Rgb, RgbImage};
use scan_effect::{PixelImage, ScanRequest, scan};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = PixelImage::Color(RgbImage::from_fn(800, 600, |x, y| {
        let r = (x * 255 / 800) as u8;
        let g = (y * 255 / 600) as u8;
        let b = ((x + y) * 255 / 1400) as u8;
        Rgb([r, g, b])
    }));

    for effect in scan_effect::ImageEffect::all_effects() {
        let request = ScanRequest::new()
            .with_effect(effect)
            .with_contrast(1.2)
            .with_brightness(10);

        let processed = request.render(&img)?;
        let jpeg = scan::encode_jpeg(&processed, request.quality())?;

        let path = output_dir.join(format!("{effect}_effect.jpg"));
        std::fs::write(&path, jpeg)?;
        println!("✓ {effect:<9} -> {}", path.display());
    }

    Ok(())
}
