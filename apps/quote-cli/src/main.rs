//! # sticker-quote
//!
//! Answers sticker price queries from the command line.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► QuoteConfig::load ──► init logging (stderr)                   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │          PricingEngine (standard or STICKER_PRICING_TABLES)            │
//! │                 │                                                       │
//! │  argv ──► Command::parse ──► quote / quantities / tables               │
//! │                                     │                                   │
//! │                         Ok  ──► JSON on stdout, exit 0                  │
//! │                         Err ──► ApiError JSON on stderr, exit 2 / 1     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod config;

use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sticker_core::{quote, ApiError, PricingEngine};

use crate::cli::{Command, USAGE};
use crate::config::QuoteConfig;

fn main() -> anyhow::Result<ExitCode> {
    let config = QuoteConfig::load()?;
    init_logging(&config);

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return Ok(ExitCode::from(64));
        }
    };

    let engine = config.engine().context("Failed to build pricing engine")?;
    info!(quantities = ?engine.available_quantities(), "Pricing engine ready");

    run(&engine, command)
}

fn run(engine: &PricingEngine, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Quantities => print_json(&quote::available_quantities(engine)),
        Command::Tables => print_json(engine.tables()),
        Command::Price(query) => {
            debug!(?query, "price command");
            match quote::quote(engine, &query) {
                Ok(quote) => print_json(&quote),
                Err(err) => report(&err),
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<ExitCode> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

/// Client errors exit with 2, everything else with 1.
fn report(err: &ApiError) -> anyhow::Result<ExitCode> {
    let json = serde_json::to_string_pretty(err).context("Failed to serialize error")?;
    eprintln!("{json}");
    Ok(if err.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(config: &QuoteConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
