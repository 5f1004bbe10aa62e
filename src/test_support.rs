//! Shared fakes for unit tests.

use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    root_created: Arc<AtomicBool>,
}

impl Default for MockStorage {
    fn default() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
            root_created: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }

    pub async fn put_file(&self, path: &str, data: Vec<u8>) {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn root_created(&self) -> bool {
        self.root_created.load(Ordering::SeqCst)
    }
}

impl Storage for MockStorage {
    async fn ensure_root(&self) -> Result<()> {
        self.root_created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("read-only storage: {}", path),
            )));
        }
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn locate(&self, path: &str) -> String {
        format!("test_output/{}", path)
    }
}

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Plain-text subscriber writing every event at `DEBUG` and above here.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        let buffer = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut buffer = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct MockConfig {
    pub listing_url_template: String,
    pub page_count: u32,
    pub base_url: String,
    pub link_selector: String,
    pub metadata_selector: String,
    pub content_marker: String,
    pub output_path: String,
    pub rescrape_threshold: usize,
    pub user_agent: String,
    pub referer: Option<String>,
    pub headers: Vec<(String, String)>,
    pub dedupe_links: bool,
}

impl MockConfig {
    /// Directory pages at `{base}/directory?page=N`, profiles under `base`.
    pub fn new(base_url: &str) -> Self {
        Self {
            listing_url_template: format!("{}/directory?page={{page}}", base_url),
            page_count: 7,
            base_url: base_url.to_string(),
            link_selector: crate::config::DEFAULT_LINK_SELECTOR.to_string(),
            metadata_selector: crate::config::DEFAULT_METADATA_SELECTOR.to_string(),
            content_marker: crate::config::DEFAULT_CONTENT_MARKER.to_string(),
            output_path: "test_output".to_string(),
            rescrape_threshold: 42,
            user_agent: "directory-etl-tests".to_string(),
            referer: None,
            headers: Vec::new(),
            dedupe_links: false,
        }
    }
}

impl ConfigProvider for MockConfig {
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
        Duration::from_secs(5)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn referer(&self) -> Option<&str> {
        self.referer.as_deref()
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn dedupe_links(&self) -> bool {
        self.dedupe_links
    }
}

pub fn directory_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<a class="experts_link w-inline-block" href="{}"><div>Cabinet</div></a>"#,
                link
            )
        })
        .collect();
    format!(
        "<html><body><div class=\"experts_list\">{}</div><a class=\"nav\" href=\"/next\">Next</a></body></html>",
        anchors
    )
}

pub fn profile_page(json_ld: &str) -> String {
    format!(
        r#"<html><head>
<script type="application/ld+json">{{"@context":"https://schema.org","@type":"WebSite","name":"Directory"}}</script>
<script type="application/ld+json">{}</script>
</head><body><h1>Cabinet</h1></body></html>"#,
        json_ld
    )
}
