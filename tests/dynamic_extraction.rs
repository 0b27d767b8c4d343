//! Dynamic path against a page that renders its rate with JavaScript
//!
//! Needs a local Chrome/Chromium (or network access for the managed
//! download), so these tests are ignored by default:
//! `cargo test --test dynamic_extraction -- --ignored`

use std::time::Duration;

use hysa_apy::{ApyError, Bank, BrowserConfig, BrowserError, Config, DynamicExtractor, Extractor, RateDispatcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RENDERED_PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <div id="rates"></div>
    <script>
      setTimeout(() => {
        const span = document.createElement("span");
        span.className = "apy";
        span.textContent = "4.40% APY";
        document.getElementById("rates").appendChild(span);
      }, 300);
    </script>
  </body>
</html>"#;

async fn serve_rendered_page() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/savings"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RENDERED_PAGE, "text/html"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
#[ignore = "requires a Chrome/Chromium browser"]
async fn reads_script_rendered_rate() {
    let server = serve_rendered_page().await;
    let bank = Bank::new("Render Bank", format!("{}/savings", server.uri()), "span.apy", false);

    let dispatcher = RateDispatcher::new(&Config::default()).unwrap();
    let apy = dispatcher.get_savings_apy(&bank).await.unwrap();

    assert_eq!(apy, 4.4);
}

#[tokio::test]
#[ignore = "requires a Chrome/Chromium browser"]
async fn never_visible_element_times_out_when_bounded() {
    let server = serve_rendered_page().await;
    let bank = Bank::new("Render Bank", format!("{}/savings", server.uri()), "#missing", false);

    let config = BrowserConfig {
        visible_timeout_ms: Some(1_500),
        ..BrowserConfig::default()
    };
    let extractor = DynamicExtractor::new(&config).unwrap();

    let err = tokio::time::timeout(Duration::from_secs(60), extractor.extract(&bank))
        .await
        .expect("bounded wait should finish")
        .unwrap_err();

    assert!(matches!(
        err,
        ApyError::DynamicScrape { source: BrowserError::WaitFailed(_), .. }
    ));
}
