use crate::config::{
    DEFAULT_CONTENT_MARKER, DEFAULT_LINK_SELECTOR, DEFAULT_METADATA_SELECTOR,
    DEFAULT_OUTPUT_PATH, DEFAULT_PAGE_COUNT, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RESCRAPE_THRESHOLD, DEFAULT_USER_AGENT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_provider, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub listing_url_template: String,
    pub base_url: String,
    pub page_count: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Sent with every request, after the user agent and referer.
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub link_selector: Option<String>,
    pub metadata_selector: Option<String>,
    pub content_marker: Option<String>,
    pub dedupe_links: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub rescrape_threshold: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn listing_url_template(&self) -> &str {
        &self.source.listing_url_template
    }

    fn page_count(&self) -> u32 {
        self.source.page_count.unwrap_or(DEFAULT_PAGE_COUNT)
    }

    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn link_selector(&self) -> &str {
        self.extract
            .link_selector
            .as_deref()
            .unwrap_or(DEFAULT_LINK_SELECTOR)
    }

    fn metadata_selector(&self) -> &str {
        self.extract
            .metadata_selector
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_SELECTOR)
    }

    fn content_marker(&self) -> &str {
        self.extract
            .content_marker
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_MARKER)
    }

    fn output_path(&self) -> &str {
        self.load.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn rescrape_threshold(&self) -> usize {
        self.load
            .rescrape_threshold
            .unwrap_or(DEFAULT_RESCRAPE_THRESHOLD)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source
                .timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn referer(&self) -> Option<&str> {
        self.source.referer.as_deref()
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.source
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn dedupe_links(&self) -> bool {
        self.extract.dedupe_links.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        for (name, value) in self.extra_headers() {
            reqwest::header::HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                EtlError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            reqwest::header::HeaderValue::from_str(&value).map_err(|e| {
                EtlError::InvalidConfigValueError {
                    field: format!("source.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}
