// hysa-apy: scrape the configured banks' savings APYs one after another
//
// Banks come from the `banks:` list of the YAML config. Results go to stdout,
// logs to stderr (filter with RUST_LOG).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use hysa_apy::{Bank, RateDispatcher};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hysa-apy", version, about = "Scrape advertised savings APYs from bank web pages")]
struct Cli {
    /// YAML config file (defaults to ./config.yaml, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only scrape the bank with this name
    #[arg(short, long)]
    bank: Option<String>,

    /// Print a JSON report instead of one line per bank
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BankReport<'a> {
    name: &'a str,
    apy: Option<f64>,
    error: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    checked_at: DateTime<Utc>,
    banks: Vec<BankReport<'a>>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => hysa_apy::load_yaml_config_from(path)?,
        None => hysa_apy::load_yaml_config()?,
    };

    let banks: Vec<&Bank> = config
        .banks
        .iter()
        .filter(|b| cli.bank.as_deref().is_none_or(|name| b.name == name))
        .collect();

    if banks.is_empty() {
        anyhow::bail!(match &cli.bank {
            Some(name) => format!("No bank named '{name}' in config"),
            None => "No banks configured; add a `banks:` list to the config file".to_string(),
        });
    }

    let dispatcher = RateDispatcher::new(&config).context("Failed to set up extractors")?;
    let checked_at = Utc::now();

    let mut reports = Vec::with_capacity(banks.len());
    for bank in banks {
        info!("Checking {}", bank.name);
        let report = match dispatcher.get_savings_apy(bank).await {
            Ok(apy) => BankReport {
                name: &bank.name,
                apy: Some(apy),
                error: None,
            },
            Err(e) => {
                warn!("{}", e);
                BankReport {
                    name: &bank.name,
                    apy: None,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    if cli.json {
        let report = Report {
            checked_at,
            banks: reports,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for report in &reports {
            match report.apy {
                Some(apy) => println!("{}: {:.2}%", report.name, apy),
                None => println!(
                    "{}: error: {}",
                    report.name,
                    report.error.as_deref().unwrap_or_default()
                ),
            }
        }
    }

    if failed > 0 {
        warn!("{} bank(s) failed", failed);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
