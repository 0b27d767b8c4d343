//! Strategy selection and rate sanitization
//!
//! `RateDispatcher` owns one extractor per strategy and picks between them
//! per bank. Extractor errors pass through untouched; only parse failures
//! get wrapped with the bank name.

use std::sync::Arc;

use tracing::debug;

use crate::Config;
use crate::bank::Bank;
use crate::extractor::{DynamicExtractor, Extractor, StaticExtractor};
use crate::rate::extract_rate;
use crate::utils::ApyError;

#[derive(Clone)]
pub struct RateDispatcher {
    static_extractor: Arc<dyn Extractor>,
    dynamic_extractor: Arc<dyn Extractor>,
}

impl RateDispatcher {
    /// Build the real static and dynamic extractors from `config`
    ///
    /// No browser is launched here; the dynamic extractor starts one per call.
    pub fn new(config: &Config) -> Result<Self, ApyError> {
        Ok(Self::with_extractors(
            Arc::new(StaticExtractor::new(&config.http)?),
            Arc::new(DynamicExtractor::new(&config.browser)?),
        ))
    }

    /// Use caller-supplied extractors (e.g. in tests)
    pub fn with_extractors(
        static_extractor: Arc<dyn Extractor>,
        dynamic_extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            static_extractor,
            dynamic_extractor,
        }
    }

    fn extractor_for(&self, bank: &Bank) -> &dyn Extractor {
        if bank.is_static {
            self.static_extractor.as_ref()
        } else {
            self.dynamic_extractor.as_ref()
        }
    }

    /// Retrieve `bank`'s advertised APY
    pub async fn get_savings_apy(&self, bank: &Bank) -> Result<f64, ApyError> {
        let extractor = self.extractor_for(bank);
        debug!("Extracting APY for {} ({})", bank.name, extractor.kind());

        let text = extractor.extract(bank).await?;

        let rate = extract_rate(&text).map_err(|source| ApyError::RateExtraction {
            bank: bank.name.clone(),
            source,
        })?;

        debug!("{}: {:?} -> {}", bank.name, text, rate);
        Ok(rate)
    }
}
