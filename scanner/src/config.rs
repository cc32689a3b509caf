use anyhow::{Context, Result, bail};
use derivative::Derivative;
use log::{debug, warn};
use scan_effect::scan::DEFAULT_JPEG_QUALITY;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[derivative(Default(value = "\"static\".to_string()"))]
    pub output_dir: String,

    #[derivative(Default(value = "DEFAULT_JPEG_QUALITY"))]
    pub jpeg_quality: u8,

    /// Store a copy of each accepted input next to its result.
    pub keep_input: bool,

    pub defaults: Defaults,
}

/// Values used when the command line leaves a parameter out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Defaults {
    #[derivative(Default(value = "\"grayscale\".to_string()"))]
    pub effect: String,

    #[derivative(Default(value = "1.0"))]
    pub contrast: f32,

    #[derivative(Default(value = "0"))]
    pub brightness: i32,
}

impl Config {
    /// Loads the configuration at `path`.
    ///
    /// A missing file is created with the defaults. A malformed file is copied
    /// to `<path>.bak` and replaced by the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(c) => c,
                Err(e) => {
                    warn!("parse config {} failed: {e}", path.display());

                    let bak_file = format!("{}.bak", path.display());
                    fs::copy(path, &bak_file)
                        .with_context(|| format!("backup config to {bak_file} failed"))?;

                    let mut c = Config::default();
                    c.config_path = path.to_path_buf();
                    c.save()?;
                    c
                }
            },
            Err(_) => {
                debug!("config {} not found, using defaults", path.display());

                let mut c = Config::default();
                c.config_path = path.to_path_buf();
                if let Err(e) = c.save() {
                    warn!("{e:?}");
                }
                c
            }
        };

        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Saves the current configuration to file
    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| format!("save config {} failed", self.config_path.display()))?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }
}
