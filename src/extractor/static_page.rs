//! Static extraction: one GET, parse the HTML, select the APY element

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use super::Extractor;
use crate::HttpConfig;
use crate::bank::Bank;
use crate::utils::constants::STATIC_USER_AGENT;
use crate::utils::{ApyError, validate_timeout};

/// Extracts the APY from server-delivered HTML without running scripts
///
/// Only the requested page is fetched; links are never followed. When the
/// selector matches several elements the first one in document order wins.
#[derive(Clone)]
pub struct StaticExtractor {
    client: reqwest::Client,
}

impl StaticExtractor {
    pub fn new(config: &HttpConfig) -> Result<Self, ApyError> {
        let timeout = validate_timeout("http.timeout_ms", config.timeout_ms)?;

        let client = reqwest::Client::builder()
            .user_agent(STATIC_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ApyError::HttpClient)?;

        Ok(Self { client })
    }

    async fn fetch_html(&self, bank: &Bank) -> Result<String, ApyError> {
        let fetch_error = |source| ApyError::Fetch {
            bank: bank.name.clone(),
            source,
        };

        let response = self
            .client
            .get(&bank.apy_data_link)
            .send()
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?;

        response.text().await.map_err(fetch_error)
    }
}

#[async_trait]
impl Extractor for StaticExtractor {
    fn kind(&self) -> &'static str {
        "static"
    }

    async fn extract(&self, bank: &Bank) -> Result<String, ApyError> {
        debug!("Fetching {} for {}", bank.apy_data_link, bank.name);
        let html = self.fetch_html(bank).await?;
        select_first_text(&html, bank)
    }
}

/// Trimmed text of the first element matching the bank's selector
///
/// Kept synchronous: `scraper::Html` is not `Send` and must not live across
/// an await point.
fn select_first_text(html: &str, bank: &Bank) -> Result<String, ApyError> {
    let selector = Selector::parse(&bank.apy_selector).map_err(|e| ApyError::InvalidSelector {
        bank: bank.name.clone(),
        selector: bank.apy_selector.clone(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut matches = document.select(&selector);

    let first = matches.next().ok_or_else(|| ApyError::SelectorNotFound {
        bank: bank.name.clone(),
    })?;

    let ignored = matches.count();
    if ignored > 0 {
        debug!(
            "Selector '{}' matched {} elements for {}; using the first",
            bank.apy_selector,
            ignored + 1,
            bank.name
        );
    }

    let text = first.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        return Err(ApyError::EmptyExtraction {
            bank: bank.name.clone(),
        });
    }

    Ok(text)
}
