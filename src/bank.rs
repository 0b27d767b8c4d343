//! Bank descriptor supplied by callers for each extraction

use serde::{Deserialize, Serialize};

use crate::dispatcher::RateDispatcher;
use crate::utils::ApyError;
use crate::Config;

/// Where and how to find a bank's advertised savings APY
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Display name, used in errors and logs
    pub name: String,

    /// Page that shows the APY
    pub apy_data_link: String,

    /// CSS selector of the element holding the APY text
    pub apy_selector: String,

    /// Fetch raw HTML instead of rendering the page in a browser
    #[serde(default)]
    pub is_static: bool,
}

impl Bank {
    pub fn new(
        name: impl Into<String>,
        apy_data_link: impl Into<String>,
        apy_selector: impl Into<String>,
        is_static: bool,
    ) -> Self {
        Self {
            name: name.into(),
            apy_data_link: apy_data_link.into(),
            apy_selector: apy_selector.into(),
            is_static,
        }
    }

    /// Retrieve this bank's APY with a dispatcher built from default settings
    ///
    /// Callers scraping several banks should build one [`RateDispatcher`] and
    /// reuse it instead.
    pub async fn get_savings_apy(&self) -> Result<f64, ApyError> {
        RateDispatcher::new(&Config::default())?
            .get_savings_apy(self)
            .await
    }
}
