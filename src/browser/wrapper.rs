//! Scoped browser lifecycle for a single dynamic scrape
//!
//! A `BrowserWrapper` is launched per extraction and torn down when the
//! extraction finishes. There is no pooling and no reuse across calls.

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserResult};
use crate::BrowserConfig;
use crate::utils::constants::PROFILE_DIR_PREFIX;

/// Wrapper for Browser, its event handler task and its profile directory
///
/// `shutdown()` is the orderly exit path. If the wrapper is dropped without
/// it (early return through a panic, or the caller abandoning the future),
/// `Drop` aborts the handler and hands the browser to a background task that
/// kills Chrome, waits for it to exit and only then removes the profile.
pub struct BrowserWrapper {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser: Some(browser),
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    /// Open a blank page to navigate from
    pub async fn new_blank_page(&self) -> BrowserResult<Page> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| BrowserError::PageCreationFailed("Browser already shut down".into()))?;

        browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))
    }

    /// Close the browser, wait for the process to exit, then remove the profile
    ///
    /// Failures are logged and swallowed: the scrape result is already decided
    /// by the time teardown runs.
    pub async fn shutdown(mut self) {
        debug!("Shutting down per-call browser");

        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser cleanly: {}", e);
            }

            // The profile directory is only released once Chrome has exited
            if let Err(e) = browser.wait().await {
                warn!("Failed to wait for browser exit: {}", e);
            }
        }

        if let Some(path) = self.user_data_dir.take() {
            remove_profile(&path);
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();

        let browser = self.browser.take();
        let Some(path) = self.user_data_dir.take() else {
            return;
        };

        warn!("BrowserWrapper dropped without shutdown(); killing browser before removing profile");

        match (browser, tokio::runtime::Handle::try_current()) {
            (Some(mut browser), Ok(runtime)) => {
                runtime.spawn(async move {
                    if let Some(Err(e)) = browser.kill().await {
                        warn!("Failed to kill abandoned browser: {}", e);
                    }
                    if let Err(e) = browser.wait().await {
                        warn!("Failed to wait for abandoned browser exit: {}", e);
                    }
                    remove_profile(&path);
                });
            }
            (browser, _) => {
                // No runtime to reap on: the child is killed when `Browser` drops
                drop(browser);
                remove_profile(&path);
            }
        }
    }
}

/// Remove a profile directory (blocking)
///
/// Blocking `remove_dir_all` because this also runs from `Drop`.
fn remove_profile(path: &Path) {
    debug!("Cleaning up browser profile: {}", path.display());
    if let Err(e) = std::fs::remove_dir_all(path) {
        warn!(
            "Failed to clean up browser profile {}: {}. Manual cleanup may be required.",
            path.display(),
            e
        );
    }
}

/// Launch a fresh, isolated browser for one extraction
///
/// Every call gets its own profile directory so concurrent callers never
/// contend for Chrome's profile lock.
pub async fn launch_browser(config: &BrowserConfig) -> BrowserResult<BrowserWrapper> {
    let user_data_dir = std::env::temp_dir().join(format!(
        "{}_{}_{}",
        PROFILE_DIR_PREFIX,
        std::process::id(),
        uuid::Uuid::new_v4().simple()
    ));

    info!("Launching browser with profile {}", user_data_dir.display());

    let (browser, handler) = crate::browser_setup::launch_browser(config, user_data_dir.clone())
        .await
        .map_err(|e| BrowserError::LaunchFailed(format!("{e:#}")))?;

    Ok(BrowserWrapper::new(browser, handler, user_data_dir))
}
