use crate::domain::model::{ProfileRecord, RunSummary};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use chrono::Utc;

/// Decides whether the site has to be scraped again, then always rewrites the CSV.
pub struct RunController<P: Pipeline> {
    pipeline: P,
    rescrape_threshold: usize,
}

impl<P: Pipeline> RunController<P> {
    pub fn new(pipeline: P, rescrape_threshold: usize) -> Self {
        Self {
            pipeline,
            rescrape_threshold,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        tracing::info!("🚀 Starting directory run at {}", started_at.to_rfc3339());

        self.pipeline.prepare().await?;

        let existing = self.existing_records().await;
        let (records, listings_harvested, reused_existing) =
            if existing.len() < self.rescrape_threshold {
                tracing::info!(
                    "Found {} saved records, below the threshold of {}; scraping",
                    existing.len(),
                    self.rescrape_threshold
                );
                let listings = self.pipeline.harvest().await?;
                self.pipeline.extract(&listings).await?;
                let records = self.pipeline.load_existing().await?;
                (records, Some(listings.len()), false)
            } else {
                tracing::info!(
                    "Saved extraction already holds {} records (threshold {}). Skipping scraping.",
                    existing.len(),
                    self.rescrape_threshold
                );
                (existing, None, true)
            };

        let csv_path = self.pipeline.transform(&records).await?;

        Ok(RunSummary {
            started_at,
            reused_existing,
            listings_harvested,
            records: records.len(),
            csv_path,
        })
    }

    // Anything that cannot be read back counts as no prior data.
    async fn existing_records(&self) -> Vec<ProfileRecord> {
        match self.pipeline.load_existing().await {
            Ok(records) => records,
            Err(e) => {
                tracing::info!(
                    "No existing extraction found or error reading it ({}). Will scrape new data.",
                    e
                );
                Vec::new()
            }
        }
    }
}
