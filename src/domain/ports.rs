use crate::domain::model::{ListingRef, ProfileRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Creates the storage root if it does not exist yet. Idempotent.
    fn ensure_root(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, used in log lines and the run summary.
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    /// Directory page URL with a `{page}` placeholder.
    fn listing_url_template(&self) -> &str;
    fn page_count(&self) -> u32;
    /// Origin that relative profile links are resolved against.
    fn base_url(&self) -> &str;
    fn link_selector(&self) -> &str;
    fn metadata_selector(&self) -> &str;
    /// Literal substring a metadata block must contain to be picked.
    fn content_marker(&self) -> &str;
    fn output_path(&self) -> &str;
    fn rescrape_threshold(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn referer(&self) -> Option<&str>;
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
    fn dedupe_links(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Makes sure the output location exists before anything is read or written.
    async fn prepare(&self) -> Result<()>;
    /// Records saved by the last extraction.
    async fn load_existing(&self) -> Result<Vec<ProfileRecord>>;
    async fn harvest(&self) -> Result<Vec<ListingRef>>;
    async fn extract(&self, listings: &[ListingRef]) -> Result<Vec<ProfileRecord>>;
    /// Writes the CSV and returns where it went.
    async fn transform(&self, records: &[ProfileRecord]) -> Result<String>;
}
