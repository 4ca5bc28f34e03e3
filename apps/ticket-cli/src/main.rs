//! # ticket
//!
//! Prints a priced ticket for a list of purchase lines.
//!
//! ## Usage
//! ```bash
//! # Demo catalog, text receipt
//! ticket
//!
//! # Lines from a file, JSON output, reject bad lines
//! ticket --catalog lines.json --format json --strict
//!
//! # Explicit config file
//! ticket --config ./ticket.toml
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ticket_cli::{
    init_tracing, run, DemoCatalogSource, JsonFileSource, JsonSink, OutputFormat, RunOptions,
    TextSink, TicketConfig, TicketSink, TicketSource,
};

#[derive(Debug, Parser)]
#[command(name = "ticket", version, about = "Compute a sales ticket with VAT breakdown")]
struct Cli {
    /// TOML config file.
    #[arg(long, env = "TICKET_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file of purchase lines (defaults to the demo catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: text or json.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Currency symbol appended to amounts in text output.
    #[arg(long)]
    currency_symbol: Option<String>,

    /// Reject invalid purchase lines instead of pricing them as-is.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn apply_to(self, config: &mut TicketConfig) {
        if let Some(path) = self.catalog {
            config.catalog.path = Some(path);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(symbol) = self.currency_symbol {
            config.output.currency_symbol = symbol;
        }
        if self.strict {
            config.validation.strict = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = TicketConfig::load(cli.config.clone()).context("loading configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;

    info!(
        catalog = ?config.catalog.path,
        format = %config.output.format,
        strict = config.validation.strict,
        "Configuration loaded"
    );

    let source: Box<dyn TicketSource> = match &config.catalog.path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(DemoCatalogSource),
    };

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn TicketSink> = match config.output.format {
        OutputFormat::Text => Box::new(TextSink::new(stdout, config.output.currency_symbol.clone())),
        OutputFormat::Json => Box::new(JsonSink::new(stdout)),
    };

    let options = RunOptions {
        strict: config.validation.strict,
    };
    run(source.as_ref(), sink.as_mut(), options)?;

    Ok(())
}
