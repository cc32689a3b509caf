mod cli;
mod config;
mod job;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use log::{error, info};
use scan_effect::{ImageEffect, ScanRequest};
use std::{fs, path::PathBuf, process::ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_effects {
        for effect in ImageEffect::all_effects() {
            println!("{effect}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(&cli.config)?;
    let request = build_request(&cli, &config);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {} failed", output_dir.display()))?;

    info!(
        "apply {} to {} image(s), contrast {}, brightness {}",
        request.effect(),
        cli.inputs.len(),
        request.adjustment().contrast(),
        request.adjustment().brightness()
    );

    let mut failed = 0;
    let keep_input = cli.keep_input || config.keep_input;
    for result in job::run_batch(&request, &cli.inputs, &output_dir, keep_input) {
        match result.output {
            Ok(output) => println!("{}", output.display()),
            Err(e) => {
                failed += 1;
                error!("{}: {e:#}", result.input.display());
            }
        }
    }

    if failed > 0 {
        error!("{failed} of {} image(s) failed", cli.inputs.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Command line values take precedence over the configuration defaults.
fn build_request(cli: &Cli, config: &Config) -> ScanRequest {
    let effect = cli.effect.as_deref().unwrap_or(&config.defaults.effect);

    ScanRequest::new()
        .with_effect_name(effect)
        .with_contrast(cli.contrast.unwrap_or(config.defaults.contrast))
        .with_brightness(cli.brightness.unwrap_or(config.defaults.brightness))
        .with_quality(cli.quality.unwrap_or(config.jpeg_quality))
}
