//! # ticket-core: Pure Receipt Arithmetic
//!
//! Computes a sales ticket from purchase lines: per-line net and gross
//! amounts, ticket totals, and the tax owed per VAT category. Everything here
//! is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ticket Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ticket-cli (app)                             │   │
//! │  │    TicketSource ──► build ──► TicketSink                        │   │
//! │  │    (catalog, JSON)              (text, JSON)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ticket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    tax    │  │  ticket   │  │   │
//! │  │   │  Product  │  │   Money   │  │   rate    │  │ price_line│  │   │
//! │  │   │  Ticket   │  │ rounding  │  │ unit_tax  │  │ aggregate │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PurchaseLine, PricedLine, Ticket, ...)
//! - [`money`] - Money and UnitPrice with integer arithmetic (no floating point!)
//! - [`tax`] - VAT rate per tax category
//! - [`ticket`] - Line pricing, totals, per-category breakdown, `build`
//! - [`validation`] - Opt-in strict checks on purchase lines
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ticket_core::{build, Money, Product, PurchaseLine, TaxCategory};
//!
//! let ticket = build(&[
//!     PurchaseLine::new(Product::new("Producto 1", Money::from_cents(1000), TaxCategory::General), 2),
//!     PurchaseLine::new(Product::new("Producto 2", Money::from_cents(1000), TaxCategory::Reduced), 1),
//! ]);
//!
//! assert_eq!(ticket.totals.total_net.to_string(), "30.00");
//! assert_eq!(ticket.totals.total_gross.to_string(), "35.20");
//! assert_eq!(ticket.totals.total_tax.to_string(), "5.20");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod tax;
pub mod ticket;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, UnitPrice};
pub use ticket::{aggregate, breakdown_by_category, build, price_line, price_lines};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines accepted on one ticket in strict mode.
pub const MAX_TICKET_LINES: usize = 100;

/// Maximum quantity of a single line in strict mode.
///
/// Catches typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price, in whole currency units, in strict mode.
pub const MAX_UNIT_PRICE: i64 = 1_000_000;
