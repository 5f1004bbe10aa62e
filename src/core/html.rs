use crate::utils::error::{EtlError, Result};
use scraper::{Html, Selector};

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| EtlError::ProcessingError {
        message: format!("invalid selector '{}': {}", selector, e),
    })
}

/// `href` of every element matching `selector`, in document order.
pub fn extract_links(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(selector) {
        match element.value().attr("href") {
            Some(href) => links.push(href.to_string()),
            None => tracing::debug!("Skipping matching element without href"),
        }
    }

    links
}

/// Raw text of the first block matching `selector` whose content contains
/// `marker`. Later matches are ignored.
pub fn find_structured_data(html: &str, selector: &Selector, marker: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for element in document.select(selector) {
        let content: String = element.text().collect();
        if content.contains(marker) {
            return Some(content);
        }
    }
    None
}
