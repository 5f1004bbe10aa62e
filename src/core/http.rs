use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER};
use reqwest::Client;

/// One client per run. Every request carries the configured user agent,
/// referer and extra headers, and gives up after the configured timeout.
pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    let mut headers = HeaderMap::new();

    if let Some(referer) = config.referer() {
        headers.insert(REFERER, header_value("referer", referer)?);
    }

    for (name, value) in config.extra_headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            EtlError::InvalidConfigValueError {
                field: "headers".to_string(),
                value: name.clone(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(header_name, header_value(&name, &value)?);
    }

    let client = Client::builder()
        .user_agent(config.user_agent())
        .default_headers(headers)
        .timeout(config.request_timeout())
        .build()?;

    Ok(client)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// GETs `url` and returns the body. Non-2xx statuses are errors.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    tracing::debug!("Response status: {}", response.status());

    let body = response.error_for_status()?.text().await?;
    Ok(body)
}
