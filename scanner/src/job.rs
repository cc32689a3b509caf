use anyhow::{Context, Result};
use rayon::prelude::*;
use scan_effect::{ScanRequest, scan};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Outcome of processing one input file.
#[derive(Debug)]
pub struct JobResult {
    pub input: PathBuf,
    pub output: Result<PathBuf>,
}

/// Processes `input` and writes the JPEG result as `processed_<hex>.jpg`.
/// With `keep_input`, the accepted input is also copied as `<hex>_<name>`.
pub fn run_one(
    request: &ScanRequest,
    input: &Path,
    output_dir: &Path,
    keep_input: bool,
) -> Result<PathBuf> {
    let jpeg = request
        .process_file(input)
        .with_context(|| format!("process {} failed", input.display()))?;

    if keep_input {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stored = output_dir.join(scan::stored_upload_name(&name));
        fs::copy(input, &stored)
            .with_context(|| format!("store {} failed", stored.display()))?;
        log::debug!("kept {} as {}", input.display(), stored.display());
    }

    let output = output_dir.join(scan::output_file_name());
    fs::write(&output, jpeg).with_context(|| format!("write {} failed", output.display()))?;

    log::debug!("{} -> {}", input.display(), output.display());
    Ok(output)
}

/// Processes every input independently and in parallel, keeping input order.
pub fn run_batch(
    request: &ScanRequest,
    inputs: &[PathBuf],
    output_dir: &Path,
    keep_input: bool,
) -> Vec<JobResult> {
    inputs
        .par_iter()
        .map(|input| JobResult {
            input: input.clone(),
            output: run_one(request, input, output_dir, keep_input),
        })
        .collect()
}
