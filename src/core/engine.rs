use crate::core::{DryRunReport, Pipeline, RunReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

/// Drives a [`Pipeline`] through plan, purge and convert.
///
/// Planning enumerates the input tree before anything is deleted, so a missing
/// input directory aborts with the output untouched. The purge phase finishes
/// completely before the first conversion starts.
pub struct RecompressEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RecompressEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();
        tracing::info!("Starting recompression run");

        // Plan
        let jobs = self.pipeline.plan().await?;
        tracing::info!("Planned {} conversion jobs", jobs.len());
        self.monitor.log_stats("Plan");

        // Purge
        let purge = self.pipeline.purge().await?;
        tracing::info!("Purged {} stale output files", purge.deleted.len());
        self.monitor.log_stats("Purge");

        // Convert
        let converted = self.pipeline.convert(jobs).await?;
        tracing::info!("converted {} files", converted.len());
        self.monitor.log_stats("Convert");
        self.monitor.log_final_stats();

        Ok(RunReport {
            purged: purge.deleted.len(),
            converted,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }

    pub async fn dry_run(&self) -> Result<DryRunReport> {
        let jobs = self.pipeline.plan().await?;
        let stale = self.pipeline.stale_outputs().await?;

        for path in &stale {
            tracing::info!("would delete {}", path.display());
        }
        for job in &jobs {
            tracing::info!(
                "would convert {} -> {}",
                job.input.display(),
                job.output.display()
            );
        }

        Ok(DryRunReport { stale, jobs })
    }
}
