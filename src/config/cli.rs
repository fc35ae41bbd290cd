use crate::config::toml_config::TomlConfig;
use crate::config::RecompressConfig;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "asset-recompressor")]
#[command(about = "Rebuild a mirrored directory of resized, recompressed image assets")]
pub struct CliConfig {
    /// Path to a TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of original images [default: ../public/assets/images_/races]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory to purge and regenerate [default: ../public/assets/images/races]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output height in pixels [default: 225]
    #[arg(long)]
    pub target_height: Option<u32>,

    /// Encoder quality, 0-100 [default: 80]
    #[arg(long)]
    pub quality: Option<u8>,

    /// Output format extension: avif, jpeg, jpg, png or webp [default: avif]
    #[arg(long)]
    pub output_extension: Option<String>,

    /// AVIF encoder speed, 1 (slow) to 10 (fast) [default: 6]
    #[arg(long)]
    pub speed: Option<u8>,

    /// Files processed at once in each phase [default: CPU count, 2-8]
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Show what would be deleted and converted without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path after a successful run
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log CPU and memory usage after each phase
    #[arg(long)]
    pub monitor: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file if one was given, then flags.
    pub fn resolve(&self) -> Result<RecompressConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.into_config()
            }
            None => RecompressConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(height) = self.target_height {
            config.target_height = height;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(extension) = &self.output_extension {
            config.output_extension = extension.clone();
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        config.monitoring |= self.monitor;

        Ok(config)
    }
}
