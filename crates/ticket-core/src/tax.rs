//! # Tax Rates
//!
//! Maps a [`TaxCategory`] to its fixed VAT rate.
//!
//! ```text
//!   general        21%    2100 bps
//!   reduced        10%    1000 bps
//!   superReducedA   5%     500 bps
//!   superReducedB   4%     400 bps
//!   superReducedC   4%     400 bps
//!   exempt          0%       0 bps
//!   <anything else> 0%       0 bps
//! ```

use crate::money::Money;
use crate::types::{Product, TaxCategory, TaxRate};

/// Highest rate any category resolves to.
pub const MAX_RATE: TaxRate = TaxRate::from_bps(2100);

/// Returns the VAT rate of a category.
///
/// Unrecognized categories are untaxed.
///
/// ```rust
/// use ticket_core::tax::rate;
/// use ticket_core::types::TaxCategory;
///
/// assert_eq!(rate(&TaxCategory::Reduced).bps(), 1000);
/// assert_eq!(rate(&TaxCategory::parse("luxury")).bps(), 0);
/// ```
pub fn rate(category: &TaxCategory) -> TaxRate {
    match category {
        TaxCategory::General => TaxRate::from_bps(2100),
        TaxCategory::Reduced => TaxRate::from_bps(1000),
        TaxCategory::SuperReducedA => TaxRate::from_bps(500),
        TaxCategory::SuperReducedB => TaxRate::from_bps(400),
        TaxCategory::SuperReducedC => TaxRate::from_bps(400),
        TaxCategory::Exempt => TaxRate::zero(),
        TaxCategory::Unrecognized(_) => TaxRate::zero(),
    }
}

/// Tax on one unit of a product, rounded to cents.
///
/// For display. Line pricing does not use this value; it keeps the unit tax
/// unrounded (see [`crate::ticket::price_line`]).
pub fn unit_tax(product: &Product) -> Money {
    product.unit_price.calculate_tax(rate(&product.tax_category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::UnitPrice;
    use proptest::prelude::*;

    fn product(price_cents: i64, category: TaxCategory) -> Product {
        Product::new("Producto 1", Money::from_cents(price_cents), category)
    }

    #[test]
    fn test_known_rates() {
        assert_eq!(rate(&TaxCategory::General).bps(), 2100);
        assert_eq!(rate(&TaxCategory::Reduced).bps(), 1000);
        assert_eq!(rate(&TaxCategory::SuperReducedA).bps(), 500);
        assert_eq!(rate(&TaxCategory::SuperReducedB).bps(), 400);
        assert_eq!(rate(&TaxCategory::SuperReducedC).bps(), 400);
        assert_eq!(rate(&TaxCategory::Exempt), TaxRate::zero());
    }

    #[test]
    fn test_general_tax_on_ten() {
        let tax = unit_tax(&product(1000, TaxCategory::General));
        assert_eq!(tax, Money::from_cents(210));
    }

    #[test]
    fn test_unit_tax_on_sub_cent_price() {
        // 0.0185 at 10% = 0.00185 → 0.00
        let weighed = Product::new("Queso al peso", UnitPrice::from_scaled(185), TaxCategory::Reduced);
        assert_eq!(unit_tax(&weighed), Money::zero());
    }

    #[test]
    fn test_exempt_and_unknown_are_untaxed() {
        assert_eq!(unit_tax(&product(1000, TaxCategory::Exempt)), Money::zero());
        assert_eq!(unit_tax(&product(1000, TaxCategory::parse("luxury"))), Money::zero());
    }

    #[test]
    fn test_max_rate_bounds_known_rates() {
        for category in TaxCategory::KNOWN {
            assert!(rate(&category) <= MAX_RATE);
        }
    }

    proptest! {
        #[test]
        fn unknown_labels_resolve_to_zero(label in "[A-Za-z]{1,16}") {
            let category = TaxCategory::parse(&label);
            prop_assume!(!category.is_recognized());
            prop_assert_eq!(rate(&category), TaxRate::zero());
        }

        #[test]
        fn unit_tax_never_exceeds_max_rate(price in 0i64..10_000_000) {
            for category in TaxCategory::KNOWN {
                let tax = unit_tax(&product(price, category));
                prop_assert!(tax >= Money::zero());
                prop_assert!(tax <= Money::from_cents(price).calculate_tax(MAX_RATE));
            }
        }
    }
}
