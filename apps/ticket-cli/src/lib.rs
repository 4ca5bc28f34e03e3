//! # ticket-cli
//!
//! Application boundary around `ticket-core`.
//!
//! ## Module Organization
//! ```text
//! ticket_cli/
//! ├── lib.rs      ◄─── You are here (module exports, logging setup)
//! ├── app.rs      ◄─── Source → build → Sink composition
//! ├── config.rs   ◄─── TOML + environment configuration
//! ├── source.rs   ◄─── TicketSource trait and implementations
//! ├── sink.rs     ◄─── TicketSink trait and implementations
//! └── error.rs    ◄─── AppError
//! ```
//!
//! The core never sees a source or a sink: both are resolved here and the
//! pipeline only receives plain purchase lines.

pub mod app;
pub mod config;
pub mod error;
pub mod sink;
pub mod source;

pub use app::{run, RunOptions};
pub use config::{OutputFormat, TicketConfig};
pub use error::{AppError, AppResult};
pub use sink::{JsonSink, MemorySink, TextSink, TicketSink};
pub use source::{DemoCatalogSource, JsonFileSource, MemorySource, TicketSource};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the ticket.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ticket_cli=trace` - Trace this crate only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
