use std::num::ParseFloatError;

use thiserror::Error;

use crate::browser::BrowserError;

/// Errors produced while turning extracted text into a rate
#[derive(Error, Debug)]
pub enum RateParseError {
    #[error("no number found")]
    NoNumberFound,

    #[error("invalid number '{text}': {source}")]
    InvalidNumber {
        text: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Errors that can occur while retrieving a bank's APY
///
/// Every variant that concerns a single extraction names the bank so callers
/// can report failures without additional context.
#[derive(Error, Debug)]
pub enum ApyError {
    #[error("failed to fetch APY page for {bank}: {source}")]
    Fetch {
        bank: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("APY selector not found for {bank}")]
    SelectorNotFound { bank: String },

    #[error("empty APY extracted for {bank}")]
    EmptyExtraction { bank: String },

    #[error("invalid APY selector '{selector}' for {bank}: {reason}")]
    InvalidSelector {
        bank: String,
        selector: String,
        reason: String,
    },

    #[error("{bank} dynamic page scrape error: {source}")]
    DynamicScrape {
        bank: String,
        #[source]
        source: BrowserError,
    },

    #[error("error extracting APY for {bank}: {source}")]
    RateExtraction {
        bank: String,
        #[source]
        source: RateParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApyError {
    /// Name of the bank the error concerns, if any
    pub fn bank(&self) -> Option<&str> {
        match self {
            ApyError::Fetch { bank, .. }
            | ApyError::SelectorNotFound { bank }
            | ApyError::EmptyExtraction { bank }
            | ApyError::InvalidSelector { bank, .. }
            | ApyError::DynamicScrape { bank, .. }
            | ApyError::RateExtraction { bank, .. } => Some(bank),
            ApyError::HttpClient(_) | ApyError::InvalidConfig(_) => None,
        }
    }
}
