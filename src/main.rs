use clap::Parser;
use directory_etl::domain::ports::ConfigProvider;
use directory_etl::utils::logger::{self, LogFormat};
use directory_etl::utils::validation::Validate;
use directory_etl::{CliConfig, DirectoryPipeline, LocalStorage, RunController};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(config.verbose, format);

    tracing::info!("Starting directory-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let threshold = config.rescrape_threshold();
    let pipeline = match DirectoryPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Could not set up the HTTP client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let controller = RunController::new(pipeline, threshold);

    match controller.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Run completed: {} records{}",
                summary.records,
                if summary.reused_existing {
                    " (reused saved extraction)"
                } else {
                    ""
                }
            );
            println!("✅ Run completed successfully!");
            println!("📁 CSV saved to: {}", summary.csv_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
