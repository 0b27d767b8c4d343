//! Savings APY scraping for bank web pages
//!
//! Pages that serve their rates in plain HTML are fetched with reqwest and
//! queried with scraper; pages that render them client-side are loaded in a
//! per-call headless Chrome via chromiumoxide. Either way the element text is
//! reduced to the first decimal number it contains.

mod bank;
mod browser;
pub mod browser_setup;
mod dispatcher;
pub mod extractor;
mod rate;
mod utils;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use anyhow::Context;

pub use bank::Bank;
pub use browser::{BrowserError, BrowserResult, BrowserWrapper, launch_browser};
pub use dispatcher::RateDispatcher;
pub use extractor::{DynamicExtractor, Extractor, StaticExtractor};
pub use rate::extract_rate;
pub use utils::constants;
pub use utils::{ApyError, RateParseError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    /// Banks scraped by the `hysa-apy` binary
    #[serde(default)]
    pub banks: Vec<Bank>,
}

/// Static fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout for the static GET
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
}

/// Browser security and launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Disable web security features (Same-Origin Policy, etc.)
    /// WARNING: Only enable for trusted content
    #[serde(default = "default_disable_security")]
    pub disable_security: bool,

    /// Timeout for each DevTools protocol command
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Upper bound for the APY element to become visible; unset waits
    /// until it appears or the browser connection fails
    #[serde(default)]
    pub visible_timeout_ms: Option<u64>,

    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

fn default_http_timeout_ms() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_MS
}

fn default_headless() -> bool {
    true
}

fn default_disable_security() -> bool {
    false // SECURE BY DEFAULT
}

fn default_request_timeout_ms() -> u64 {
    constants::DEFAULT_CDP_REQUEST_TIMEOUT_MS
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            disable_security: default_disable_security(),
            request_timeout_ms: default_request_timeout_ms(),
            visible_timeout_ms: None,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Config {
    /// Reject settings the extractors would refuse at construction time
    pub fn validate(&self) -> Result<(), ApyError> {
        utils::validate_timeout("http.timeout_ms", self.http.timeout_ms)?;
        utils::validate_timeout("browser.request_timeout_ms", self.browser.request_timeout_ms)?;
        utils::validate_optional_timeout(
            "browser.visible_timeout_ms",
            self.browser.visible_timeout_ms,
        )?;

        if let Some(bank) = self.banks.iter().find(|b| b.name.trim().is_empty()) {
            return Err(ApyError::InvalidConfig(format!(
                "bank with link '{}' has an empty name",
                bank.apy_data_link
            )));
        }

        Ok(())
    }
}

/// Load config from config.yaml in the current directory, falling back to defaults
pub fn load_yaml_config() -> anyhow::Result<Config> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_yaml_config_in(&cwd)
}

/// Load config from `dir/config.yaml`, falling back to defaults when absent
pub fn load_yaml_config_in(dir: &Path) -> anyhow::Result<Config> {
    let config_path = dir.join("config.yaml");

    if config_path.exists() {
        load_yaml_config_from(&config_path)
    } else {
        Ok(Config::default())
    }
}

/// Load and validate config from an explicit YAML file
pub fn load_yaml_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.http.timeout_ms, 30_000);
        assert!(config.browser.headless);
        assert!(!config.browser.disable_security);
        assert_eq!(config.browser.visible_timeout_ms, None);
        assert_eq!(config.browser.window.width, 1280);
        assert!(config.banks.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_banks_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.yaml");
        fs::write(
            &path,
            r##"
http:
  timeout_ms: 10000
browser:
  visible_timeout_ms: 15000
banks:
  - name: Acme Bank
    apy_data_link: https://acme.example/savings
    apy_selector: span.apy
    is_static: true
  - name: Render Bank
    apy_data_link: https://render.example/hysa
    apy_selector: "#rate"
"##,
        )
        .unwrap();

        let config = load_yaml_config_from(&path).unwrap();
        assert_eq!(config.http.timeout_ms, 10_000);
        assert_eq!(config.browser.visible_timeout_ms, Some(15_000));
        assert_eq!(config.banks.len(), 2);
        assert!(config.banks[0].is_static);
        assert!(!config.banks[1].is_static);
        assert_eq!(config.banks[1].apy_selector, "#rate");
    }

    #[test]
    fn out_of_range_timeout_fails_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "browser:\n  request_timeout_ms: 900000\n").unwrap();

        let err = load_yaml_config_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("browser.request_timeout_ms"));
    }

    #[test]
    fn config_yaml_is_looked_up_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_yaml_config_in(dir.path()).unwrap();
        assert!(config.banks.is_empty());

        fs::write(
            dir.path().join("config.yaml"),
            "banks:\n  - name: Acme Bank\n    apy_data_link: https://acme.example\n    apy_selector: .apy\n",
        )
        .unwrap();
        let config = load_yaml_config_in(dir.path()).unwrap();
        assert_eq!(config.banks.len(), 1);
        assert_eq!(config.banks[0].name, "Acme Bank");
    }

    #[test]
    fn blank_bank_name_is_rejected() {
        let config = Config {
            banks: vec![Bank::new("  ", "https://x.example", ".apy", true)],
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ApyError::InvalidConfig(_))));
    }
}
