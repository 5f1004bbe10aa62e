use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use scraper::Selector;
use url::Url;

pub const PAGE_PLACEHOLDER: &str = "{page}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// The template must carry `{page}` and still be a valid URL once it is filled in.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains(PAGE_PLACEHOLDER) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Template must contain the {} placeholder", PAGE_PLACEHOLDER),
        });
    }
    validate_url(field_name, &template.replace(PAGE_PLACEHOLDER, "1"))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: selector.to_string(),
            reason: format!("Invalid CSS selector: {}", e),
        })
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url_template("listing_url_template", config.listing_url_template())?;
    validate_positive_number("page_count", u64::from(config.page_count()), 1)?;
    validate_url("base_url", config.base_url())?;
    validate_selector("link_selector", config.link_selector())?;
    validate_selector("metadata_selector", config.metadata_selector())?;
    validate_non_empty_string("content_marker", config.content_marker())?;
    validate_path("output_path", config.output_path())?;
    validate_positive_number("request_timeout", config.request_timeout().as_secs(), 1)?;
    validate_non_empty_string("user_agent", config.user_agent())?;
    if let Some(referer) = config.referer() {
        validate_url("referer", referer)?;
    }
    Ok(())
}
