use crate::core::html::{extract_links, parse_selector};
use crate::core::http::fetch_html;
use crate::core::sink::{OutputSink, LISTINGS_FILE};
use crate::domain::model::ListingRef;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::PAGE_PLACEHOLDER;
use reqwest::Client;
use std::collections::HashSet;

/// Walks the directory pages and collects profile links.
pub struct ListingHarvester<'a, S: Storage, C: ConfigProvider> {
    client: &'a Client,
    config: &'a C,
    sink: &'a OutputSink<S>,
}

impl<'a, S: Storage, C: ConfigProvider> ListingHarvester<'a, S, C> {
    pub fn new(client: &'a Client, config: &'a C, sink: &'a OutputSink<S>) -> Self {
        Self {
            client,
            config,
            sink,
        }
    }

    pub fn page_url(&self, page: u32) -> String {
        self.config
            .listing_url_template()
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Fetches pages 1..=page_count one after another. A page that fails
    /// contributes nothing; only the final write of `listings.json` can fail
    /// the harvest.
    pub async fn harvest(&self) -> Result<Vec<ListingRef>> {
        let selector = parse_selector(self.config.link_selector())?;
        let mut all_listings = Vec::new();

        for page in 1..=self.config.page_count() {
            match self.harvest_page(page, &selector).await {
                Ok(page_listings) => {
                    tracing::info!("Page {}: Found {} items", page, page_listings.len());
                    all_listings.extend(page_listings);
                }
                Err(e) => {
                    tracing::error!("Error fetching data for page {}: {}", page, e);
                }
            }
        }

        if self.config.dedupe_links() {
            let before = all_listings.len();
            all_listings = dedupe(all_listings);
            let dropped = before - all_listings.len();
            if dropped > 0 {
                tracing::info!("Dropped {} duplicate links", dropped);
            }
        }

        tracing::info!("Total listings found: {}", all_listings.len());

        let location = self.sink.write_json(LISTINGS_FILE, &all_listings).await?;
        tracing::info!("💾 Data saved to {}", location);

        Ok(all_listings)
    }

    async fn harvest_page(&self, page: u32, selector: &scraper::Selector) -> Result<Vec<ListingRef>> {
        let html = fetch_html(self.client, &self.page_url(page)).await?;
        Ok(extract_links(&html, selector)
            .into_iter()
            .map(ListingRef::new)
            .collect())
    }
}

/// Keeps the first occurrence of every link.
fn dedupe(listings: Vec<ListingRef>) -> Vec<ListingRef> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.link.clone()))
        .collect()
}
