use crate::core::imaging::{self, EncodeSettings, OutputFormat};
use crate::core::paths::derive_output_path;
use crate::core::{ConfigProvider, ConversionJob, ConversionOutcome, Pipeline, PurgeReport, Storage};
use crate::utils::error::{RecompressError, Result};
use crate::utils::validation::validate_disjoint_roots;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;
use std::path::PathBuf;

/// Deletes every file under the output root, then converts every file under
/// the input root, running at most `concurrency` operations at a time in each
/// phase. The first failure ends the phase; work already in flight is dropped
/// and nothing is rolled back.
///
/// Construction fails when the two roots overlap, since purging the output
/// would then delete inputs.
pub struct RecompressPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    settings: EncodeSettings,
}

impl<S: Storage, C: ConfigProvider> RecompressPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        validate_disjoint_roots(config.input_dir(), config.output_dir())?;

        let settings = EncodeSettings {
            format: OutputFormat::from_extension(config.output_extension())?,
            target_height: config.target_height(),
            quality: config.quality(),
            speed: config.speed(),
        };

        if !settings.format.is_lossy() {
            tracing::debug!("{} output is lossless, quality setting ignored", settings.format);
        }

        Ok(Self {
            storage,
            config,
            settings,
        })
    }

    fn extension(&self) -> String {
        self.config
            .output_extension()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }

    async fn delete_one(&self, path: PathBuf) -> Result<PathBuf> {
        self.storage.remove_file(&path).await?;
        tracing::info!("deleted {}", path.display());
        Ok(path)
    }

    async fn convert_one(&self, job: ConversionJob) -> Result<ConversionOutcome> {
        let bytes = self.storage.read_file(&job.input).await?;

        // 解碼與編碼是 CPU 密集工作
        let settings = self.settings;
        let input = job.input.clone();
        let encoded =
            tokio::task::spawn_blocking(move || imaging::recompress(&input, &bytes, &settings))
                .await??;

        self.storage.write_file(&job.output, &encoded.data).await?;

        tracing::info!("{}", job.output.display());
        tracing::info!("width: {}, height: {}", encoded.width, encoded.height);

        Ok(ConversionOutcome {
            input: job.input,
            output: job.output,
            width: encoded.width,
            height: encoded.height,
            bytes: encoded.data.len() as u64,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RecompressPipeline<S, C> {
    async fn plan(&self) -> Result<Vec<ConversionJob>> {
        let input_root = self.config.input_dir();
        let output_root = self.config.output_dir();
        let extension = self.extension();

        tracing::debug!("Listing input files under {}", input_root.display());
        let files = self.storage.list_files(input_root).await?;

        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(files.len());
        let mut jobs = Vec::with_capacity(files.len());
        for input in files {
            let output = derive_output_path(input_root, output_root, &input, &extension)?;
            if let Some(first) = claimed.insert(output.clone(), input.clone()) {
                return Err(RecompressError::OutputCollisionError {
                    output,
                    first,
                    second: input,
                });
            }
            jobs.push(ConversionJob { input, output });
        }

        Ok(jobs)
    }

    async fn stale_outputs(&self) -> Result<Vec<PathBuf>> {
        tracing::debug!(
            "Listing stale output files under {}",
            self.config.output_dir().display()
        );
        self.storage.list_files(self.config.output_dir()).await
    }

    async fn purge(&self) -> Result<PurgeReport> {
        // 目錄可能在建構後才被建立或換成符號連結
        validate_disjoint_roots(self.config.input_dir(), self.config.output_dir())?;

        let stale = self.stale_outputs().await?;

        let deletions: Vec<_> = stale.into_iter().map(|path| self.delete_one(path)).collect();
        let deleted = stream::iter(deletions)
            .buffer_unordered(self.config.concurrency().max(1))
            .try_collect::<Vec<_>>()
            .await?;

        Ok(PurgeReport { deleted })
    }

    async fn convert(&self, jobs: Vec<ConversionJob>) -> Result<Vec<ConversionOutcome>> {
        tracing::debug!(
            "Converting {} files to {} (height {}, quality {})",
            jobs.len(),
            self.settings.format,
            self.settings.target_height,
            self.settings.quality
        );

        let conversions: Vec<_> = jobs.into_iter().map(|job| self.convert_one(job)).collect();
        stream::iter(conversions)
            .buffer_unordered(self.config.concurrency().max(1))
            .try_collect::<Vec<_>>()
            .await
    }
}
