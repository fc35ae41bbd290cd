pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LogFormat};

pub use adapters::storage::LocalStorage;
pub use app::pipelines::recompress_pipeline::RecompressPipeline;
pub use config::RecompressConfig;
pub use core::{engine::RecompressEngine, imaging::OutputFormat};
pub use utils::error::{RecompressError, Result};
