//! # Ticket Sinks
//!
//! Everything that can receive a finished [`Ticket`]. All presentation
//! (currency symbol, column layout) happens here; the core only hands over
//! plain amounts.
//!
//! ## Text Layout
//! ```text
//! Item                        Qty        Net      Gross
//! Producto 1                    2     20.00€     24.20€
//! Producto 2                    1     10.00€     11.00€
//!
//! VAT general (21%): 4.20€
//! VAT reduced (10%): 1.00€
//!
//! Total net: 30.00€
//! Total VAT: 5.20€
//! Total gross: 35.20€
//! ```

use std::io::Write;

use ticket_core::{tax, Money, Ticket};
use tracing::debug;

use crate::error::AppResult;

/// Receives a finished ticket.
pub trait TicketSink {
    fn accept(&mut self, ticket: &Ticket) -> AppResult<()>;
}

// =============================================================================
// Text
// =============================================================================

/// Renders a receipt as plain text.
pub struct TextSink<W: Write> {
    out: W,
    currency_symbol: String,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, currency_symbol: impl Into<String>) -> Self {
        TextSink {
            out,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn amount(&self, money: Money) -> String {
        format!("{}{}", money, self.currency_symbol)
    }
}

impl<W: Write> TicketSink for TextSink<W> {
    fn accept(&mut self, ticket: &Ticket) -> AppResult<()> {
        let mut text = String::new();

        text.push_str(&format!(
            "{:<24} {:>6} {:>10} {:>10}\n",
            "Item", "Qty", "Net", "Gross"
        ));
        for line in &ticket.lines {
            text.push_str(&format!(
                "{:<24} {:>6} {:>10} {:>10}\n",
                line.name,
                line.quantity,
                self.amount(line.net_amount),
                self.amount(line.gross_amount)
            ));
        }

        if !ticket.tax_breakdown.is_empty() {
            text.push('\n');
        }
        for entry in &ticket.tax_breakdown {
            text.push_str(&format!(
                "VAT {} ({}%): {}\n",
                entry.tax_category,
                tax::rate(&entry.tax_category).percentage(),
                self.amount(entry.amount)
            ));
        }

        let totals = &ticket.totals;
        text.push('\n');
        text.push_str(&format!("Total net: {}\n", self.amount(totals.total_net)));
        text.push_str(&format!("Total VAT: {}\n", self.amount(totals.total_tax)));
        text.push_str(&format!("Total gross: {}\n", self.amount(totals.total_gross)));

        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;

        debug!(lines = ticket.lines.len(), "Rendered text ticket");
        Ok(())
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Writes the ticket structure as pretty JSON.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TicketSink for JsonSink<W> {
    fn accept(&mut self, ticket: &Ticket) -> AppResult<()> {
        serde_json::to_writer_pretty(&mut self.out, ticket)?;
        writeln!(self.out)?;
        self.out.flush()?;

        debug!(lines = ticket.lines.len(), "Wrote JSON ticket");
        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// Keeps every accepted ticket.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub tickets: Vec<Ticket>,
}

impl TicketSink for MemorySink {
    fn accept(&mut self, ticket: &Ticket) -> AppResult<()> {
        self.tickets.push(ticket.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_core::{build, Product, PurchaseLine, TaxCategory};

    fn sample_ticket() -> Ticket {
        build(&[
            PurchaseLine::new(
                Product::new("Producto 1", Money::from_cents(1000), TaxCategory::General),
                2,
            ),
            PurchaseLine::new(
                Product::new("Producto 2", Money::from_cents(1000), TaxCategory::Reduced),
                1,
            ),
        ])
    }

    fn render_text(ticket: &Ticket) -> String {
        let mut sink = TextSink::new(Vec::new(), "€");
        sink.accept(ticket).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_text_sink_lines_and_totals() {
        let text = render_text(&sample_ticket());

        assert!(text.contains("Producto 1"));
        assert!(text.contains("20.00€"));
        assert!(text.contains("24.20€"));
        assert!(text.contains("VAT general (21%): 4.20€"));
        assert!(text.contains("VAT reduced (10%): 1.00€"));
        assert!(text.contains("Total net: 30.00€"));
        assert!(text.contains("Total VAT: 5.20€"));
        assert!(text.contains("Total gross: 35.20€"));
    }

    #[test]
    fn test_text_sink_breakdown_order() {
        let text = render_text(&sample_ticket());
        let general = text.find("VAT general").unwrap();
        let reduced = text.find("VAT reduced").unwrap();
        assert!(general < reduced);
    }

    #[test]
    fn test_text_sink_unknown_category_shows_zero_rate() {
        let ticket = build(&[PurchaseLine::new(
            Product::new("Raro", Money::from_cents(500), TaxCategory::parse("luxury")),
            1,
        )]);
        let text = render_text(&ticket);
        assert!(text.contains("VAT luxury (0%): 0.00€"));
    }

    #[test]
    fn test_text_sink_empty_ticket() {
        let text = render_text(&Ticket::default());
        assert!(text.contains("Total gross: 0.00€"));
        assert!(!text.contains("VAT "));
    }

    #[test]
    fn test_json_sink_round_trips() {
        let ticket = sample_ticket();
        let mut sink = JsonSink::new(Vec::new());
        sink.accept(&ticket).unwrap();

        let back: Ticket = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn test_json_sink_uses_plain_cents_and_labels() {
        let mut sink = JsonSink::new(Vec::new());
        sink.accept(&sample_ticket()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert_eq!(value["totals"]["total_gross"], 3520);
        assert_eq!(value["tax_breakdown"][1]["tax_category"], "reduced");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::default();
        sink.accept(&sample_ticket()).unwrap();
        sink.accept(&Ticket::default()).unwrap();
        assert_eq!(sink.tickets.len(), 2);
    }
}
