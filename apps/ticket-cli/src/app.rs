//! # Composition
//!
//! Wires a source and a sink around the pure pipeline.
//!
//! ```text
//! TicketSource::lines() ──► [validate_lines if strict] ──► build ──► TicketSink::accept()
//! ```

use ticket_core::{validation, Ticket};
use tracing::{info, instrument};

use crate::error::AppResult;
use crate::sink::TicketSink;
use crate::source::TicketSource;

/// Options that change how a ticket is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Reject invalid lines instead of pricing them as-is.
    pub strict: bool,
}

/// Loads lines from `source`, builds the ticket, hands it to `sink`.
///
/// Returns the ticket that was written.
#[instrument(skip_all, fields(source = %source.describe(), strict = options.strict))]
pub fn run(
    source: &dyn TicketSource,
    sink: &mut dyn TicketSink,
    options: RunOptions,
) -> AppResult<Ticket> {
    let lines = source.lines()?;

    if options.strict {
        validation::validate_lines(&lines)?;
    }

    let ticket = ticket_core::build(&lines);
    info!(
        lines = ticket.lines.len(),
        total_net = %ticket.totals.total_net,
        total_tax = %ticket.totals.total_tax,
        total_gross = %ticket.totals.total_gross,
        "Ticket built"
    );

    sink.accept(&ticket)?;
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::sink::MemorySink;
    use crate::source::{DemoCatalogSource, MemorySource};
    use ticket_core::{Money, Product, PurchaseLine, TaxCategory};

    fn line(name: &str, price_cents: i64, qty: i64, category: &str) -> PurchaseLine {
        PurchaseLine::new(
            Product::new(name, Money::from_cents(price_cents), TaxCategory::parse(category)),
            qty,
        )
    }

    #[test]
    fn test_run_hands_built_ticket_to_sink() {
        let source = MemorySource::new(vec![
            line("Producto 1", 1000, 2, "general"),
            line("Producto 2", 1000, 1, "reduced"),
        ]);
        let mut sink = MemorySink::default();

        let ticket = run(&source, &mut sink, RunOptions::default()).unwrap();

        assert_eq!(sink.tickets, vec![ticket.clone()]);
        assert_eq!(ticket.totals.total_net, Money::from_cents(3000));
        assert_eq!(ticket.totals.total_gross, Money::from_cents(3520));
        assert_eq!(ticket.totals.total_tax, Money::from_cents(520));
    }

    #[test]
    fn test_permissive_run_prices_bad_lines() {
        let source = MemorySource::new(vec![
            line("Devolución", 1000, -1, "general"),
            line("Raro", 500, 1, "luxury"),
        ]);
        let mut sink = MemorySink::default();

        let ticket = run(&source, &mut sink, RunOptions { strict: false }).unwrap();

        assert_eq!(ticket.lines[0].gross_amount, Money::from_cents(-1210));
        assert_eq!(ticket.lines[1].tax(), Money::zero());
    }

    #[test]
    fn test_strict_run_rejects_and_writes_nothing() {
        let source = MemorySource::new(vec![line("Raro", 500, 1, "luxury")]);
        let mut sink = MemorySink::default();

        let err = run(&source, &mut sink, RunOptions { strict: true }).unwrap_err();

        assert!(matches!(err, AppError::Rejected(_)));
        assert!(sink.tickets.is_empty());
    }

    #[test]
    fn test_demo_catalog_passes_strict_mode() {
        let mut sink = MemorySink::default();
        let ticket = run(&DemoCatalogSource, &mut sink, RunOptions { strict: true }).unwrap();
        assert!(!ticket.is_empty());
        assert_eq!(
            ticket.totals.total_tax,
            ticket.totals.total_gross - ticket.totals.total_net
        );
    }

    #[test]
    fn test_empty_source_gives_zero_ticket() {
        let mut sink = MemorySink::default();
        let ticket = run(&MemorySource::default(), &mut sink, RunOptions::default()).unwrap();
        assert_eq!(ticket, Ticket::default());
    }
}
