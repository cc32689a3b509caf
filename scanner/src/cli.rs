use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Apply scanner style effects to PNG/JPEG images")]
pub struct Cli {
    /// Images to process (.png, .jpg, .jpeg)
    #[arg(required_unless_present = "list_effects")]
    pub inputs: Vec<PathBuf>,

    /// Effect name: grayscale, sepia, invert, sketch or threshold
    #[arg(short, long)]
    pub effect: Option<String>,

    /// Contrast gain
    #[arg(short, long)]
    pub contrast: Option<f32>,

    /// Brightness offset
    #[arg(short, long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Directory receiving the processed images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JPEG quality
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Also store each accepted input as <hex>_<name> in the output directory
    #[arg(long)]
    pub keep_input: bool,

    /// Configuration file
    #[arg(long, default_value = "scanner.toml")]
    pub config: PathBuf,

    /// Print the available effects and exit
    #[arg(long)]
    pub list_effects: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
