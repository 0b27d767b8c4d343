//! APY text extraction strategies
//!
//! - `StaticExtractor` fetches server-delivered HTML and selects from it
//! - `DynamicExtractor` renders the page in a headless browser first
//!
//! Both return the raw text of the APY element; turning it into a number is
//! the dispatcher's job.

mod dynamic_page;
mod static_page;

pub use dynamic_page::DynamicExtractor;
pub use static_page::StaticExtractor;

use async_trait::async_trait;

use crate::bank::Bank;
use crate::utils::ApyError;

/// Capability shared by both extraction strategies
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name for logs
    fn kind(&self) -> &'static str;

    /// Read the text of the element matching `bank.apy_selector` on `bank.apy_data_link`
    async fn extract(&self, bank: &Bank) -> Result<String, ApyError>;
}
