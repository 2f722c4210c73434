//! invoice-fx CLI - interactive invoice settlement
//!
//! Asks for an invoice and its payments on the terminal, converting foreign
//! currency amounts with historical NBP rates.
//!
//! ## Example Usage
//!
//! ```bash
//! # Live NBP rates
//! invoice-fx
//!
//! # Offline, rates from a CSV file (date,currency,rate)
//! invoice-fx --rates-file rates.csv
//!
//! # Debug logging of every rate request and fallback
//! invoice-fx --verbose
//! ```

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use invoice_fx::calendar::SupportedRange;
use invoice_fx::config::{SourceConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use invoice_fx::console::Console;
use invoice_fx::data::fx::{InMemoryRateSource, RateSource};
use invoice_fx::data::sources::NbpRateSource;
use invoice_fx::session::Session;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

/// invoice-fx: settle invoices against payments with NBP exchange rates
#[derive(Parser, Debug)]
#[command(name = "invoice-fx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Settle an invoice against payments using historical NBP exchange rates", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Base URL of the rate API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Read rates from a CSV file (date,currency,rate) instead of the API
    #[arg(long, value_name = "PATH")]
    rates_file: Option<PathBuf>,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        SourceConfig::default()
            .with_base_url(self.api_url.clone())
            .with_timeout_secs(self.timeout)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        println!(
            "{} v{}",
            "invoice-fx".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = build_source(cli)?;
    if cli.verbose {
        println!("Rate source: {}", source.name().dimmed());
    }

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(source, console, SupportedRange::until_today());
    let summary = session.run()?;

    log::info!(
        "Session finished after {} payment(s): {}",
        summary.payments,
        summary.status
    );
    Ok(())
}

fn build_source(cli: &Cli) -> anyhow::Result<Box<dyn RateSource>> {
    match &cli.rates_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open rates file {}", path.display()))?;
            let mut source = InMemoryRateSource::new();
            let count = source
                .load_from_csv(BufReader::new(file))
                .with_context(|| format!("Failed to load rates file {}", path.display()))?;
            log::info!("Loaded {} quotes from {}", count, path.display());
            Ok(Box::new(source))
        }
        None => {
            let source = NbpRateSource::new(cli.source_config())
                .context("Failed to set up the NBP rate source")?;
            Ok(Box::new(source))
        }
    }
}
