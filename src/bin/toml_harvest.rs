use clap::Parser;
use directory_etl::domain::ports::ConfigProvider;
use directory_etl::utils::logger::{self, LogFormat};
use directory_etl::utils::validation::Validate;
use directory_etl::{DirectoryPipeline, LocalStorage, RunController, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-harvest")]
#[command(about = "Directory harvest driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "directory-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print what would be fetched without making any request
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    logger::init_logger(args.verbose, LogFormat::Compact);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No request will be made");
        for page in 1..=config.page_count() {
            println!(
                "  GET {}",
                config
                    .listing_url_template()
                    .replace(directory_etl::utils::validation::PAGE_PLACEHOLDER, &page.to_string())
            );
        }
        return;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let threshold = config.rescrape_threshold();
    let pipeline = match DirectoryPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    match RunController::new(pipeline, threshold).run().await {
        Ok(summary) => {
            println!("✅ Run completed successfully!");
            println!("📊 Records: {}", summary.records);
            println!("📁 CSV saved to: {}", summary.csv_path);
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Listing pages: {} x {}", config.page_count(), config.listing_url_template());
    println!("  Profiles under: {}", config.base_url());
    println!("  Output: {}", config.output_path());
    println!("  Re-scrape below: {} records", config.rescrape_threshold());
    println!("  Timeout: {:?}", config.request_timeout());
    if config.dedupe_links() {
        println!("  Duplicate links: dropped");
    }
    println!();
}
