use asset_recompressor::utils::{logger, validation::Validate};
use asset_recompressor::{
    CliConfig, LocalStorage, LogFormat, RecompressEngine, RecompressError, RecompressPipeline,
};
use clap::Parser;

fn fail(e: RecompressError) -> ! {
    tracing::error!("❌ Recompression failed: {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e);
    std::process::exit(e.category().exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting asset-recompressor");

    // 解析並驗證配置
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let monitor_enabled = config.monitoring;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = match RecompressPipeline::new(LocalStorage::new(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };
    let engine = RecompressEngine::new_with_monitoring(pipeline, monitor_enabled);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be deleted or written");
        match engine.dry_run().await {
            Ok(plan) => {
                println!(
                    "Would delete {} files and convert {} files",
                    plan.stale.len(),
                    plan.jobs.len()
                );
                return Ok(());
            }
            Err(e) => fail(e),
        }
    }

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Converted {} files, purged {} in {}ms",
                report.converted.len(),
                report.purged,
                report.elapsed_ms
            );

            if let Some(path) = &cli.report {
                let json = report.to_json().unwrap_or_else(|e| fail(e));
                if let Err(source) = tokio::fs::write(path, json).await {
                    fail(RecompressError::WriteError {
                        path: path.clone(),
                        source,
                    });
                }
                tracing::info!("📁 Report saved to: {}", path.display());
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}
