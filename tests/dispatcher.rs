//! Strategy selection with substitute extractors

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hysa_apy::{ApyError, Bank, Extractor, RateDispatcher, RateParseError};

/// Returns a canned result and counts how often it was asked
struct FakeExtractor {
    kind: &'static str,
    text: Option<&'static str>,
    calls: AtomicUsize,
}

impl FakeExtractor {
    fn returning(kind: &'static str, text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            text: Some(text),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(kind: &'static str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            text: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn kind(&self) -> &'static str {
        self.kind
    }

    async fn extract(&self, bank: &Bank) -> Result<String, ApyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.text {
            Some(text) => Ok(text.to_string()),
            None => Err(ApyError::SelectorNotFound {
                bank: bank.name.clone(),
            }),
        }
    }
}

fn bank(is_static: bool) -> Bank {
    Bank::new("Acme Bank", "https://acme.example/savings", ".apy", is_static)
}

#[tokio::test]
async fn static_bank_never_touches_dynamic_extractor() {
    let static_extractor = FakeExtractor::returning("static", "4.25%");
    let dynamic_extractor = FakeExtractor::returning("dynamic", "9.99%");
    let dispatcher = RateDispatcher::with_extractors(static_extractor.clone(), dynamic_extractor.clone());

    let apy = dispatcher.get_savings_apy(&bank(true)).await.unwrap();

    assert_eq!(apy, 4.25);
    assert_eq!(static_extractor.calls(), 1);
    assert_eq!(dynamic_extractor.calls(), 0);
}

#[tokio::test]
async fn dynamic_is_the_default_strategy() {
    let static_extractor = FakeExtractor::returning("static", "1.00%");
    let dynamic_extractor = FakeExtractor::returning("dynamic", "\n  5.10% APY\n");
    let dispatcher = RateDispatcher::with_extractors(static_extractor.clone(), dynamic_extractor.clone());

    let apy = dispatcher.get_savings_apy(&bank(false)).await.unwrap();

    assert_eq!(apy, 5.1);
    assert_eq!(static_extractor.calls(), 0);
    assert_eq!(dynamic_extractor.calls(), 1);
}

#[tokio::test]
async fn extractor_errors_pass_through_unchanged() {
    let dispatcher = RateDispatcher::with_extractors(
        FakeExtractor::failing("static"),
        FakeExtractor::returning("dynamic", "4.00%"),
    );

    let err = dispatcher.get_savings_apy(&bank(true)).await.unwrap_err();
    assert!(matches!(err, ApyError::SelectorNotFound { bank } if bank == "Acme Bank"));
}

#[tokio::test]
async fn parse_failure_is_wrapped_with_bank_name() {
    let dispatcher = RateDispatcher::with_extractors(
        FakeExtractor::returning("static", "N/A"),
        FakeExtractor::returning("dynamic", "N/A"),
    );

    let err = dispatcher.get_savings_apy(&bank(false)).await.unwrap_err();
    match err {
        ApyError::RateExtraction { bank, source } => {
            assert_eq!(bank, "Acme Bank");
            assert!(matches!(source, RateParseError::NoNumberFound));
        }
        other => panic!("expected rate extraction error, got {other:?}"),
    }
}

#[tokio::test]
async fn negative_looking_rate_yields_magnitude() {
    let dispatcher = RateDispatcher::with_extractors(
        FakeExtractor::returning("static", "-0.25%"),
        FakeExtractor::failing("dynamic"),
    );

    assert_eq!(dispatcher.get_savings_apy(&bank(true)).await.unwrap(), 0.25);
}
