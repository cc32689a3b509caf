/// Pencil sketch example
/// Usage: cargo run -p scan-effect --example sketch_demo -- <image> [contrast] [brightness]

use scan_effect::{ImageEffect, ScanRequest, scan};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "data/test.png".to_string());
    let contrast = args.next().map(|v| v.parse()).transpose()?.unwrap_or(1.0);
    let brightness = args.next().map(|v| v.parse()).transpose()?.unwrap_or(0);

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let jpeg = ScanRequest::new()
        .with_effect(ImageEffect::Sketch)
        .with_contrast(contrast)
        .with_brightness(brightness)
        .process_file(&input)?;

    let output = output_dir.join(scan::output_file_name());
    std::fs::write(&output, jpeg)?;

    println!("✓ Sketch effect applied successfully!");
    println!("  Input:  {input}");
    println!("  Effect: {}", output.display());

    Ok(())
}
