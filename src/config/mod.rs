#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::imaging::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_disjoint_roots, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "../public/assets/images_/races";
pub const DEFAULT_OUTPUT_DIR: &str = "../public/assets/images/races";
pub const DEFAULT_TARGET_HEIGHT: u32 = 225;
pub const DEFAULT_QUALITY: u8 = 80;
pub const DEFAULT_OUTPUT_EXTENSION: &str = "avif";
pub const DEFAULT_SPEED: u8 = 6;

/// CPU count clamped to 2..=8.
pub fn default_concurrency() -> usize {
    num_cpus::get().clamp(2, 8)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecompressConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target_height: u32,
    pub quality: u8,
    pub output_extension: String,
    pub speed: u8,
    pub concurrency: usize,
    pub monitoring: bool,
}

impl Default for RecompressConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            target_height: DEFAULT_TARGET_HEIGHT,
            quality: DEFAULT_QUALITY,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            speed: DEFAULT_SPEED,
            concurrency: default_concurrency(),
            monitoring: false,
        }
    }
}

impl ConfigProvider for RecompressConfig {
    fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn target_height(&self) -> u32 {
        self.target_height
    }

    fn quality(&self) -> u8 {
        self.quality
    }

    fn output_extension(&self) -> &str {
        &self.output_extension
    }

    fn speed(&self) -> u8 {
        self.speed
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Validate for RecompressConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_dir", &self.input_dir)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_disjoint_roots(&self.input_dir, &self.output_dir)?;

        validate_positive_number("target_height", self.target_height as usize, 1)?;
        validate_range("quality", self.quality, 0, 100)?;
        validate_range("speed", self.speed, 1, 10)?;
        validate_positive_number("concurrency", self.concurrency, 1)?;

        validate_non_empty_string("output_extension", &self.output_extension)?;
        OutputFormat::from_extension(&self.output_extension)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
