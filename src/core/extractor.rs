use crate::core::html::{find_structured_data, parse_selector};
use crate::core::http::fetch_html;
use crate::core::sink::{OutputSink, SCRAPED_LISTINGS_FILE};
use crate::core::transformer::cell_text;
use crate::domain::model::{ListingRef, ProfileRecord};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use reqwest::Client;
use scraper::Selector;
use url::Url;

/// Result of visiting a single profile page.
#[derive(Debug)]
pub enum ProfileOutcome {
    Found(ProfileRecord),
    NoMatch,
}

/// Visits each profile page and parses its contact block.
pub struct ProfileExtractor<'a, S: Storage, C: ConfigProvider> {
    client: &'a Client,
    config: &'a C,
    sink: &'a OutputSink<S>,
}

impl<'a, S: Storage, C: ConfigProvider> ProfileExtractor<'a, S, C> {
    pub fn new(client: &'a Client, config: &'a C, sink: &'a OutputSink<S>) -> Self {
        Self {
            client,
            config,
            sink,
        }
    }

    /// One listing at a time, in order. A listing that cannot be fetched or
    /// parsed, or has no matching block, adds nothing. Records are appended
    /// in listing order and saved to `scraped_listings.json` at the end.
    pub async fn extract(&self, listings: &[ListingRef]) -> Result<Vec<ProfileRecord>> {
        let base = Url::parse(self.config.base_url())?;
        let selector = parse_selector(self.config.metadata_selector())?;
        let total = listings.len();
        let mut scraped = Vec::new();

        for (index, listing) in listings.iter().enumerate() {
            let position = index + 1;
            match self.extract_one(&base, &selector, listing).await {
                Ok(ProfileOutcome::Found(record)) => {
                    let name = record
                        .field("name")
                        .map(|name| cell_text(name, &["@value"]))
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| "<unnamed>".to_string());
                    tracing::info!("Scraped data for {} ({}/{})", name, position, total);
                    scraped.push(record);
                }
                Ok(ProfileOutcome::NoMatch) => {
                    tracing::info!("No matching data found for listing {}/{}", position, total);
                }
                Err(e) => {
                    tracing::error!(
                        "Error scraping data for listing {}/{}: {}",
                        position,
                        total,
                        e
                    );
                }
            }
        }

        let location = self
            .sink
            .write_json(SCRAPED_LISTINGS_FILE, &scraped)
            .await?;
        tracing::info!("💾 Scraped data saved to {}", location);

        Ok(scraped)
    }

    async fn extract_one(
        &self,
        base: &Url,
        selector: &Selector,
        listing: &ListingRef,
    ) -> Result<ProfileOutcome> {
        let url = base.join(&listing.link)?;
        let html = fetch_html(self.client, url.as_str()).await?;

        match find_structured_data(&html, selector, self.config.content_marker()) {
            Some(block) => Ok(ProfileOutcome::Found(serde_json::from_str(&block)?)),
            None => Ok(ProfileOutcome::NoMatch),
        }
    }
}
