//! # Ticket Pipeline
//!
//! Turns purchase lines into a finished [`Ticket`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[PurchaseLine]                                                        │
//! │       │                                                                 │
//! │       ▼  price_lines (price_line per line, input order kept)            │
//! │  Vec<PricedLine> ──────────────┬───────────────────────┐                │
//! │                                ▼                       ▼                │
//! │                           aggregate          breakdown_by_category      │
//! │                                │                       │                │
//! │                                ▼                       ▼                │
//! │                          TicketTotals       Vec<TaxCategoryAmount>      │
//! │                                └──────────┬────────────┘                │
//! │                                           ▼                             │
//! │                                        Ticket                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure and infallible. Negative or zero prices and
//! quantities are priced arithmetically; unknown categories are untaxed.
//!
//! ## Rounding
//! Net and gross are rounded to cents once per line. The per-unit tax is
//! never rounded on its own. Ticket totals and the breakdown are folds over
//! those already-rounded cent amounts, so each accumulation step stays exact.
//! Amounts beyond the `i64` range saturate (see [`crate::money`]).

use crate::money::Money;
use crate::tax;
use crate::types::{
    PricedLine, PurchaseLine, TaxCategory, TaxCategoryAmount, Ticket, TicketTotals,
};

/// Prices a single purchase line.
///
/// ```rust
/// use ticket_core::money::Money;
/// use ticket_core::ticket::price_line;
/// use ticket_core::types::{Product, PurchaseLine, TaxCategory};
///
/// let line = PurchaseLine::new(
///     Product::new("Producto 1", Money::from_cents(1000), TaxCategory::General),
///     1,
/// );
/// let priced = price_line(&line);
/// assert_eq!(priced.net_amount.cents(), 1000);
/// assert_eq!(priced.gross_amount.cents(), 1210);
/// ```
pub fn price_line(line: &PurchaseLine) -> PricedLine {
    let product = &line.product;
    let rate = tax::rate(&product.tax_category);

    PricedLine {
        name: product.name.clone(),
        quantity: line.quantity,
        net_amount: product.unit_price.net_for_quantity(line.quantity),
        tax_category: product.tax_category.clone(),
        gross_amount: product.unit_price.gross_for_quantity(rate, line.quantity),
    }
}

/// Prices every line, preserving input order.
pub fn price_lines(lines: &[PurchaseLine]) -> Vec<PricedLine> {
    lines.iter().map(price_line).collect()
}

/// Sums priced lines into ticket totals.
///
/// Left fold from zero. The running tax is accumulated from each line's
/// gross − net, not derived from the final totals.
pub fn aggregate(lines: &[PricedLine]) -> TicketTotals {
    lines
        .iter()
        .fold(TicketTotals::default(), |acc, line| TicketTotals {
            total_net: acc.total_net + line.net_amount,
            total_gross: acc.total_gross + line.gross_amount,
            total_tax: acc.total_tax + line.tax(),
        })
}

/// Groups the tax owed on each line by category.
///
/// Output holds one entry per distinct category, in the order each category
/// first appears in `lines`.
pub fn breakdown_by_category(lines: &[PricedLine]) -> Vec<TaxCategoryAmount> {
    lines
        .iter()
        .fold(Vec::<TaxCategoryAmount>::new(), |mut acc, line| {
            let owed = line.tax();
            match acc
                .iter_mut()
                .find(|entry| entry.tax_category == line.tax_category)
            {
                Some(entry) => entry.amount += owed,
                None => acc.push(TaxCategoryAmount {
                    tax_category: line.tax_category.clone(),
                    amount: owed,
                }),
            }
            acc
        })
}

/// Builds the finished ticket.
///
/// ```rust
/// use ticket_core::money::Money;
/// use ticket_core::ticket::build;
/// use ticket_core::types::{Product, PurchaseLine, TaxCategory};
///
/// let ticket = build(&[
///     PurchaseLine::new(Product::new("Producto 1", Money::from_cents(1000), TaxCategory::General), 2),
///     PurchaseLine::new(Product::new("Producto 2", Money::from_cents(1000), TaxCategory::Reduced), 1),
/// ]);
/// assert_eq!(ticket.totals.total_gross.cents(), 3520);
/// assert_eq!(ticket.tax_breakdown.len(), 2);
/// ```
pub fn build(lines: &[PurchaseLine]) -> Ticket {
    let lines = price_lines(lines);
    let totals = aggregate(&lines);
    let tax_breakdown = breakdown_by_category(&lines);

    Ticket {
        lines,
        totals,
        tax_breakdown,
    }
}

/// Tax of the summed net amounts, rounded once per category.
///
/// Not used by [`build`]: ticket totals are sums of per-line rounded amounts.
/// Kept to compare both policies.
pub fn tax_on_summed_net(lines: &[PurchaseLine]) -> Money {
    let mut per_category: Vec<(&TaxCategory, Money)> = Vec::new();
    for line in lines {
        let net = line.product.unit_price.net_for_quantity(line.quantity);
        match per_category
            .iter_mut()
            .find(|(category, _)| **category == line.product.tax_category)
        {
            Some((_, sum)) => *sum += net,
            None => per_category.push((&line.product.tax_category, net)),
        }
    }
    per_category
        .into_iter()
        .map(|(category, net)| net.calculate_tax(tax::rate(category)))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
