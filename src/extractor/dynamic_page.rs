//! Dynamic extraction: render the page in a per-call headless browser

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::Extractor;
use crate::BrowserConfig;
use crate::bank::Bank;
use crate::browser::{BrowserError, BrowserResult, BrowserWrapper, launch_browser};
use crate::utils::{ApyError, validate_optional_timeout, validate_timeout, wait_for_visible};

/// Extracts the APY from a page after its scripts have run
///
/// Each call launches its own browser and tears it down before returning,
/// whether the scrape succeeded or not. Abandoning the future also tears the
/// browser down, through `BrowserWrapper`'s `Drop`.
#[derive(Debug, Clone)]
pub struct DynamicExtractor {
    config: BrowserConfig,
    visible_timeout: Option<Duration>,
}

impl DynamicExtractor {
    pub fn new(config: &BrowserConfig) -> Result<Self, ApyError> {
        validate_timeout("browser.request_timeout_ms", config.request_timeout_ms)?;
        let visible_timeout =
            validate_optional_timeout("browser.visible_timeout_ms", config.visible_timeout_ms)?;

        Ok(Self {
            config: config.clone(),
            visible_timeout,
        })
    }

    async fn scrape(&self, browser: &BrowserWrapper, url: &Url, selector: &str) -> BrowserResult<String> {
        let page = browser.new_blank_page().await?;

        page.goto(url.as_str())
            .await
            .map_err(|e| BrowserError::NavigationFailed(format!("{url}: {e}")))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationFailed(format!("Page load did not complete for {url}: {e}")))?;

        let element = wait_for_visible(&page, selector, self.visible_timeout).await?;

        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::TextReadFailed(format!("'{selector}': {e}")))?
            .unwrap_or_default();

        Ok(text)
    }
}

/// Only http(s) pages are rendered
fn parse_page_url(link: &str) -> BrowserResult<Url> {
    let url = Url::parse(link)
        .map_err(|e| BrowserError::NavigationFailed(format!("Invalid URL '{link}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BrowserError::NavigationFailed(format!(
            "Unsupported URL scheme '{scheme}' in '{link}'; expected http or https"
        ))),
    }
}

#[async_trait]
impl Extractor for DynamicExtractor {
    fn kind(&self) -> &'static str {
        "dynamic"
    }

    async fn extract(&self, bank: &Bank) -> Result<String, ApyError> {
        let scrape_error = |source| ApyError::DynamicScrape {
            bank: bank.name.clone(),
            source,
        };

        let url = parse_page_url(&bank.apy_data_link).map_err(scrape_error)?;
        let browser = launch_browser(&self.config).await.map_err(scrape_error)?;

        debug!("Rendering {} for {}", url, bank.name);
        let result = self.scrape(&browser, &url, &bank.apy_selector).await;

        browser.shutdown().await;

        result.map_err(scrape_error)
    }
}
