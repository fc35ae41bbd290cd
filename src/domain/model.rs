use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One input image paired with the output path it will be written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// A converted image as it landed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub deleted: Vec<PathBuf>,
}

/// Only produced when every job in the run succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub purged: usize,
    pub converted: Vec<ConversionOutcome>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What a run would do, computed without touching the filesystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DryRunReport {
    pub stale: Vec<PathBuf>,
    pub jobs: Vec<ConversionJob>,
}
