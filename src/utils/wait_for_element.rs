//! Element visibility polling for client-rendered pages
//!
//! Provides wait_for_visible() which polls the rendered DOM with exponential backoff.
//! Bank pages that render their rates with JavaScript insert the element some time
//! after the initial load event fires.

use std::time::{Duration, Instant};

use chromiumoxide::Page;
use chromiumoxide::element::Element;

use crate::browser::BrowserError;

/// Build the visibility check script for a selector
///
/// The selector is embedded as a JSON string literal so quotes and
/// backslashes in it cannot break out of the expression.
fn visibility_script(selector: &str) -> Result<String, BrowserError> {
    let literal = serde_json::to_string(selector)
        .map_err(|e| BrowserError::WaitFailed(format!("Unencodable selector '{selector}': {e}")))?;

    Ok(format!(
        "(() => {{\
            const el = document.querySelector({literal});\
            if (!el) return false;\
            const style = window.getComputedStyle(el);\
            if (style.display === 'none' || style.visibility === 'hidden') return false;\
            const rect = el.getBoundingClientRect();\
            return rect.width > 0 && rect.height > 0;\
        }})()"
    ))
}

/// Wait for an element to be visible in the rendered page
///
/// An element counts as visible once it is attached, neither `display: none`
/// nor `visibility: hidden`, and has a non-empty bounding box.
///
/// # Arguments
/// * `page` - The chromiumoxide Page to search in
/// * `selector` - CSS selector for the element
/// * `timeout` - Optional upper bound; `None` waits until the element
///   appears or the browser connection fails
///
/// # Polling Strategy
/// - Starts at 100ms intervals
/// - Doubles each retry (exponential backoff)
/// - Caps at 1 second maximum interval
pub async fn wait_for_visible(
    page: &Page,
    selector: &str,
    timeout: Option<Duration>,
) -> Result<Element, BrowserError> {
    let script = visibility_script(selector)?;
    let start = Instant::now();
    let mut poll_interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        let visible: bool = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| BrowserError::WaitFailed(format!("Visibility check for '{selector}' failed: {e}")))?
            .into_value()
            .map_err(|e| BrowserError::WaitFailed(format!("Unexpected visibility result for '{selector}': {e}")))?;

        if visible {
            return page
                .find_element(selector)
                .await
                .map_err(|e| BrowserError::WaitFailed(format!("Element '{selector}' vanished after becoming visible: {e}")));
        }

        if let Some(timeout) = timeout
            && start.elapsed() >= timeout
        {
            return Err(BrowserError::WaitFailed(format!(
                "Element not visible (timeout after {}ms): '{}'",
                timeout.as_millis(),
                selector
            )));
        }

        tracing::trace!("'{}' not visible yet, retrying in {:?}", selector, poll_interval);
        tokio::time::sleep(poll_interval).await;

        poll_interval = (poll_interval * 2).min(max_interval);
    }
}
