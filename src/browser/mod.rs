//! Browser infrastructure for launching short-lived Chrome instances
//!
//! Each dynamic scrape owns exactly one browser for its whole duration.

mod wrapper;

pub use wrapper::{BrowserWrapper, launch_browser};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Wait for element failed: {0}")]
    WaitFailed(String),

    #[error("Failed to read element text: {0}")]
    TextReadFailed(String),
}

pub type BrowserResult<T> = Result<T, BrowserError>;
