use crate::core::extractor::ProfileExtractor;
use crate::core::harvester::ListingHarvester;
use crate::core::http::build_client;
use crate::core::sink::{OutputSink, SCRAPED_CSV_FILE, SCRAPED_LISTINGS_FILE};
use crate::core::transformer::render_csv;
use crate::domain::model::{ListingRef, ProfileRecord};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use reqwest::Client;

/// Harvest, extract and transform against one directory site.
pub struct DirectoryPipeline<S: Storage, C: ConfigProvider> {
    sink: OutputSink<S>,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> DirectoryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            sink: OutputSink::new(storage),
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DirectoryPipeline<S, C> {
    async fn prepare(&self) -> Result<()> {
        self.sink.ensure_ready().await
    }

    async fn load_existing(&self) -> Result<Vec<ProfileRecord>> {
        self.sink.read_json(SCRAPED_LISTINGS_FILE).await
    }

    async fn harvest(&self) -> Result<Vec<ListingRef>> {
        ListingHarvester::new(&self.client, &self.config, &self.sink)
            .harvest()
            .await
    }

    async fn extract(&self, listings: &[ListingRef]) -> Result<Vec<ProfileRecord>> {
        ProfileExtractor::new(&self.client, &self.config, &self.sink)
            .extract(listings)
            .await
    }

    async fn transform(&self, records: &[ProfileRecord]) -> Result<String> {
        let csv = render_csv(records)?;
        let location = self.sink.write_bytes(SCRAPED_CSV_FILE, &csv).await?;
        tracing::info!("💾 Scraped data saved to {}", location);
        Ok(location)
    }
}
