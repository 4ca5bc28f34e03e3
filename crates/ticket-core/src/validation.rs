//! # Validation Module
//!
//! Strict input checks for purchase lines.
//!
//! ## When Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Source ──► [validate_lines] ──► ticket::build ──► Sink                 │
//! │                  ▲                                                      │
//! │                  └── only in strict mode; build never calls it          │
//! │                                                                         │
//! │  Permissive (default):  negative qty, unknown category → priced as-is  │
//! │  Strict:                the same input → CoreError::InvalidLine         │
//! │                         price and quantity bounds keep every amount     │
//! │                         far from saturation                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ticket_core::money::Money;
//! use ticket_core::types::{Product, PurchaseLine, TaxCategory};
//! use ticket_core::validation::validate_line;
//!
//! let ok = PurchaseLine::new(Product::new("Pan", Money::from_cents(120), TaxCategory::SuperReducedA), 2);
//! assert!(validate_line(&ok).is_ok());
//!
//! let bad = PurchaseLine::new(Product::new("Pan", Money::from_cents(120), TaxCategory::parse("x")), 2);
//! assert!(validate_line(&bad).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::UnitPrice;
use crate::types::{Product, PurchaseLine, TaxCategory};
use crate::{MAX_ITEM_QUANTITY, MAX_TICKET_LINES, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items), negative is not
/// - Must not exceed [`MAX_UNIT_PRICE`] whole units
pub fn validate_unit_price(price: UnitPrice) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price > UnitPrice::from_units(MAX_UNIT_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Rejects [`TaxCategory::Unrecognized`].
pub fn validate_tax_category(category: &TaxCategory) -> ValidationResult<()> {
    match category {
        TaxCategory::Unrecognized(label) => Err(ValidationError::UnknownTaxCategory {
            label: label.clone(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of a product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_unit_price(product.unit_price)?;
    validate_tax_category(&product.tax_category)?;
    Ok(())
}

/// Validates a purchase line.
pub fn validate_line(line: &PurchaseLine) -> ValidationResult<()> {
    validate_product(&line.product)?;
    validate_quantity(line.quantity)?;
    Ok(())
}

/// Validates ticket size (number of lines).
pub fn validate_ticket_size(lines: usize) -> ValidationResult<()> {
    if lines > MAX_TICKET_LINES {
        return Err(ValidationError::OutOfRange {
            field: "ticket lines".to_string(),
            min: 0,
            max: MAX_TICKET_LINES as i64,
        });
    }

    Ok(())
}

/// Validates a whole ticket, stopping at the first bad line.
pub fn validate_lines(lines: &[PurchaseLine]) -> CoreResult<()> {
    validate_ticket_size(lines.len())?;

    for (index, line) in lines.iter().enumerate() {
        validate_line(line).map_err(|source| CoreError::InvalidLine {
            index,
            name: line.product.name.clone(),
            source,
        })?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
