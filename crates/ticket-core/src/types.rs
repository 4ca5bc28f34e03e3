//! # Domain Types
//!
//! Core domain types used throughout the ticket pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (externally supplied)          DERIVED (built by the pipeline)  │
//! │  ┌─────────────────┐                  ┌─────────────────┐              │
//! │  │    Product      │                  │   PricedLine    │              │
//! │  │  name           │                  │  net_amount     │              │
//! │  │  unit_price     │                  │  gross_amount   │              │
//! │  │  tax_category   │                  └────────┬────────┘              │
//! │  └────────┬────────┘                           │                        │
//! │  ┌────────┴────────┐              ┌────────────┴────────────┐          │
//! │  │  PurchaseLine   │              │                         │          │
//! │  │  product × qty  │     ┌────────┴───────┐   ┌─────────────┴──────┐   │
//! │  └─────────────────┘     │  TicketTotals  │   │ TaxCategoryAmount  │   │
//! │                          └────────┬───────┘   └─────────────┬──────┘   │
//! │                                   └────────► Ticket ◄───────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived types are plain values: every pipeline stage builds a new one and
//! nothing is mutated after construction.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::{Money, UnitPrice};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (general VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Category
// =============================================================================

/// VAT classification of a product.
///
/// The set of known categories is closed, but labels arrive as free text from
/// the catalog. Anything that is not a known label (or one of its aliases) is
/// kept verbatim in [`TaxCategory::Unrecognized`] instead of being rejected.
///
/// ## Labels
/// | Variant         | Label           | Alias            |
/// |-----------------|-----------------|------------------|
/// | `General`       | `general`       |                  |
/// | `Reduced`       | `reduced`       | `reducido`       |
/// | `SuperReducedA` | `superReducedA` | `superreducidoA` |
/// | `SuperReducedB` | `superReducedB` | `superreducidoB` |
/// | `SuperReducedC` | `superReducedC` | `superreducidoC` |
/// | `Exempt`        | `exempt`        | `sinIva`         |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaxCategory {
    General,
    Reduced,
    SuperReducedA,
    SuperReducedB,
    SuperReducedC,
    Exempt,
    /// A label outside the known set. Carries the original text.
    Unrecognized(String),
}

impl TaxCategory {
    /// Every recognized category, in rate order.
    pub const KNOWN: [TaxCategory; 6] = [
        TaxCategory::General,
        TaxCategory::Reduced,
        TaxCategory::SuperReducedA,
        TaxCategory::SuperReducedB,
        TaxCategory::SuperReducedC,
        TaxCategory::Exempt,
    ];

    /// Canonical label of the category.
    pub fn label(&self) -> &str {
        match self {
            TaxCategory::General => "general",
            TaxCategory::Reduced => "reduced",
            TaxCategory::SuperReducedA => "superReducedA",
            TaxCategory::SuperReducedB => "superReducedB",
            TaxCategory::SuperReducedC => "superReducedC",
            TaxCategory::Exempt => "exempt",
            TaxCategory::Unrecognized(label) => label,
        }
    }

    /// Parses a label. Never fails.
    pub fn parse(label: &str) -> Self {
        match label {
            "general" => TaxCategory::General,
            "reduced" | "reducido" => TaxCategory::Reduced,
            "superReducedA" | "superreducidoA" => TaxCategory::SuperReducedA,
            "superReducedB" | "superreducidoB" => TaxCategory::SuperReducedB,
            "superReducedC" | "superreducidoC" => TaxCategory::SuperReducedC,
            "exempt" | "sinIva" => TaxCategory::Exempt,
            other => TaxCategory::Unrecognized(other.to_string()),
        }
    }

    /// Returns false for [`TaxCategory::Unrecognized`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TaxCategory::Unrecognized(_))
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TaxCategory::parse(s))
    }
}

impl From<String> for TaxCategory {
    fn from(label: String) -> Self {
        TaxCategory::parse(&label)
    }
}

impl From<TaxCategory> for String {
    fn from(category: TaxCategory) -> Self {
        match category {
            TaxCategory::Unrecognized(label) => label,
            known => known.label().to_string(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Display name shown on the ticket.
    pub name: String,

    /// Unit price before tax. Four decimal places.
    #[ts(type = "string")]
    pub unit_price: UnitPrice,

    /// VAT category.
    #[ts(type = "string")]
    pub tax_category: TaxCategory,
}

impl Product {
    /// Creates a product. Accepts a [`UnitPrice`] or a whole-cent [`Money`].
    pub fn new(
        name: impl Into<String>,
        unit_price: impl Into<UnitPrice>,
        tax_category: TaxCategory,
    ) -> Self {
        Product {
            name: name.into(),
            unit_price: unit_price.into(),
            tax_category,
        }
    }
}

// =============================================================================
// Purchase Line
// =============================================================================

/// One product bought in some quantity.
///
/// Quantity is not validated here: zero and negative values flow through the
/// arithmetic unchanged. See [`crate::validation`] for the strict checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseLine {
    pub product: Product,
    pub quantity: i64,
}

impl PurchaseLine {
    pub fn new(product: Product, quantity: i64) -> Self {
        PurchaseLine { product, quantity }
    }
}

// =============================================================================
// Priced Line
// =============================================================================

/// A purchase line with its amounts computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedLine {
    pub name: String,
    pub quantity: i64,
    /// unit price × quantity, rounded to cents.
    pub net_amount: Money,
    #[ts(type = "string")]
    pub tax_category: TaxCategory,
    /// (unit price + unit tax) × quantity, rounded to cents.
    pub gross_amount: Money,
}

impl PricedLine {
    /// Tax owed on this line (gross − net).
    #[inline]
    pub fn tax(&self) -> Money {
        self.gross_amount - self.net_amount
    }
}

// =============================================================================
// Ticket Totals
// =============================================================================

/// Ticket-wide sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TicketTotals {
    pub total_net: Money,
    pub total_gross: Money,
    pub total_tax: Money,
}

// =============================================================================
// Tax Breakdown Entry
// =============================================================================

/// Tax owed for one category across the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxCategoryAmount {
    #[ts(type = "string")]
    pub tax_category: TaxCategory,
    pub amount: Money,
}

// =============================================================================
// Ticket
// =============================================================================

/// The finished receipt handed to a sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ticket {
    pub lines: Vec<PricedLine>,
    pub totals: TicketTotals,
    pub tax_breakdown: Vec<TaxCategoryAmount>,
}

impl Ticket {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2100);
        assert_eq!(rate.bps(), 2100);
        assert!((rate.percentage() - 21.0).abs() < 0.001);
        assert_eq!(TaxRate::default(), TaxRate::zero());
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in TaxCategory::KNOWN {
            assert_eq!(TaxCategory::parse(category.label()), category);
        }
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!(TaxCategory::parse("reducido"), TaxCategory::Reduced);
        assert_eq!(TaxCategory::parse("superreducidoA"), TaxCategory::SuperReducedA);
        assert_eq!(TaxCategory::parse("superreducidoB"), TaxCategory::SuperReducedB);
        assert_eq!(TaxCategory::parse("superreducidoC"), TaxCategory::SuperReducedC);
        assert_eq!(TaxCategory::parse("sinIva"), TaxCategory::Exempt);
    }

    #[test]
    fn test_unknown_category_keeps_label() {
        let category: TaxCategory = "luxury".parse().unwrap();
        assert_eq!(category, TaxCategory::Unrecognized("luxury".to_string()));
        assert_eq!(category.to_string(), "luxury");
        assert!(!category.is_recognized());
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(!TaxCategory::parse("General").is_recognized());
    }

    #[test]
    fn test_category_serde_uses_label() {
        let json = serde_json::to_string(&TaxCategory::SuperReducedA).unwrap();
        assert_eq!(json, "\"superReducedA\"");

        let alias: TaxCategory = serde_json::from_str("\"sinIva\"").unwrap();
        assert_eq!(alias, TaxCategory::Exempt);

        let unknown: TaxCategory = serde_json::from_str("\"luxury\"").unwrap();
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"luxury\"");
    }

    #[test]
    fn test_purchase_line_from_json() {
        let json = r#"{
            "product": { "name": "Pan", "unit_price": 1.20, "tax_category": "superReducedA" },
            "quantity": 3
        }"#;
        let line: PurchaseLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product.unit_price, UnitPrice::from(Money::from_cents(120)));
        assert_eq!(line.product.tax_category, TaxCategory::SuperReducedA);
        assert_eq!(line.quantity, 3);
    }

    #[test]
    fn test_product_accepts_sub_cent_price() {
        let json = r#"{ "name": "Queso al peso", "unit_price": "0.0185", "tax_category": "reduced" }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.unit_price, UnitPrice::from_scaled(185));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["unit_price"], "0.0185");
    }

    #[test]
    fn test_priced_line_tax() {
        let line = PricedLine {
            name: "Producto 1".to_string(),
            quantity: 2,
            net_amount: Money::from_cents(2000),
            tax_category: TaxCategory::General,
            gross_amount: Money::from_cents(2420),
        };
        assert_eq!(line.tax(), Money::from_cents(420));
    }

    #[test]
    fn test_empty_ticket_default() {
        let ticket = Ticket::default();
        assert!(ticket.is_empty());
        assert_eq!(ticket.totals, TicketTotals::default());
        assert!(ticket.tax_breakdown.is_empty());
    }
}
