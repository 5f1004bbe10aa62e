use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const LISTINGS_FILE: &str = "listings.json";
pub const SCRAPED_LISTINGS_FILE: &str = "scraped_listings.json";
pub const SCRAPED_CSV_FILE: &str = "scraped_listings.csv";

/// Writes the run's artifacts into one result directory.
pub struct OutputSink<S: Storage> {
    storage: S,
}

impl<S: Storage> OutputSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn ensure_ready(&self) -> Result<()> {
        self.storage.ensure_root().await?;
        tracing::info!("📁 Result folder ready: {}", self.storage.locate(""));
        Ok(())
    }

    /// Pretty-printed with two-space indentation, overwriting any previous file.
    pub async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<String> {
        let data = serde_json::to_vec_pretty(value)?;
        self.write_bytes(name, &data).await
    }

    pub async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let data = self.storage.read_file(name).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn write_bytes(&self, name: &str, data: &[u8]) -> Result<String> {
        self.storage.write_file(name, data).await?;
        let location = self.storage.locate(name);
        tracing::debug!("Wrote {} bytes to {}", data.len(), location);
        Ok(location)
    }
}
