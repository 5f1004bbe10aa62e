pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_provider, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_LISTING_URL_TEMPLATE: &str =
    "https://www.cabinet-gestion-patrimoine.fr/gestion-patrimoine/villes/ile-de-france?92cf8bd7_page={page}";
pub const DEFAULT_BASE_URL: &str = "https://www.cabinet-gestion-patrimoine.fr";
pub const DEFAULT_PAGE_COUNT: u32 = 7;
pub const DEFAULT_LINK_SELECTOR: &str = "a.experts_link.w-inline-block";
pub const DEFAULT_METADATA_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
pub const DEFAULT_CONTENT_MARKER: &str = r#""telephone""#;
pub const DEFAULT_OUTPUT_PATH: &str = "result_cabinetpatrimoine";
pub const DEFAULT_RESCRAPE_THRESHOLD: usize = 42;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!(
    "directory-etl/",
    env!("CARGO_PKG_VERSION"),
    " (one-off directory export)"
);

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "directory-etl")]
#[command(about = "Harvest a paginated business directory into JSON and CSV")]
pub struct CliConfig {
    /// Directory page URL; `{page}` is replaced by 1..=page-count
    #[arg(long, default_value = DEFAULT_LISTING_URL_TEMPLATE)]
    pub listing_url_template: String,

    #[arg(long, default_value_t = DEFAULT_PAGE_COUNT)]
    pub page_count: u32,

    /// Origin that relative profile links are resolved against
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_LINK_SELECTOR)]
    pub link_selector: String,

    #[arg(long, default_value = DEFAULT_METADATA_SELECTOR)]
    pub metadata_selector: String,

    /// Literal text a metadata block must contain to be picked
    #[arg(long, default_value = DEFAULT_CONTENT_MARKER)]
    pub content_marker: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Re-scrape only when the saved extraction has fewer records than this
    #[arg(long, default_value_t = DEFAULT_RESCRAPE_THRESHOLD)]
    pub rescrape_threshold: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long)]
    pub referer: Option<String>,

    /// Drop links already seen on an earlier page
    #[arg(long)]
    pub dedupe_links: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            listing_url_template: DEFAULT_LISTING_URL_TEMPLATE.to_string(),
            page_count: DEFAULT_PAGE_COUNT,
            base_url: DEFAULT_BASE_URL.to_string(),
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            metadata_selector: DEFAULT_METADATA_SELECTOR.to_string(),
            content_marker: DEFAULT_CONTENT_MARKER.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            rescrape_threshold: DEFAULT_RESCRAPE_THRESHOLD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            dedupe_links: false,
            verbose: false,
            json_logs: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn listing_url_template(&self) -> &str {
        &self.listing_url_template
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn link_selector(&self) -> &str {
        &self.link_selector
    }

    fn metadata_selector(&self) -> &str {
        &self.metadata_selector
    }

    fn content_marker(&self) -> &str {
        &self.content_marker
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn rescrape_threshold(&self) -> usize {
        self.rescrape_threshold
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn referer(&self) -> Option<&str> {
        self.referer.as_deref()
    }

    fn dedupe_links(&self) -> bool {
        self.dedupe_links
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
