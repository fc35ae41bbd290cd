use crate::domain::model::{ConversionJob, ConversionOutcome, PurgeReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Every regular file under `dir`, recursively, in no particular order.
    fn list_files(
        &self,
        dir: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
    fn remove_file(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Creates missing parent directories before writing.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_dir(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn target_height(&self) -> u32;
    fn quality(&self) -> u8;
    fn output_extension(&self) -> &str;
    fn speed(&self) -> u8;
    fn concurrency(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Enumerates the input tree and derives every job up front.
    async fn plan(&self) -> Result<Vec<ConversionJob>>;
    async fn stale_outputs(&self) -> Result<Vec<PathBuf>>;
    async fn purge(&self) -> Result<PurgeReport>;
    async fn convert(&self, jobs: Vec<ConversionJob>) -> Result<Vec<ConversionOutcome>>;
}
