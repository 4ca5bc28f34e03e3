//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    (1.005).toFixed(2) = "1.00"      ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount on a ticket is a whole number of cents.                 │
//! │    Unit prices keep four decimals (0.333/unit, per-weight prices).      │
//! │    Intermediate products (price × rate × qty) are exact in i128 and    │
//! │    rounded ONCE, half away from zero, back to cents.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Amounts saturate at the `i64` bounds instead of wrapping or panicking.
//! Strict validation keeps real tickets far below them.
//!
//! ## Usage
//! ```rust
//! use ticket_core::money::{Money, UnitPrice};
//!
//! let price = Money::from_cents(1099); // 10.99
//! let total = price + Money::from_cents(500); // 15.99
//! assert_eq!(total.to_string(), "15.99");
//!
//! let per_weight: UnitPrice = "0.333".parse().unwrap();
//! assert_eq!(per_weight.net_for_quantity(3).to_string(), "1.00");
//! ```

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Basis points in 100%.
pub(crate) const BPS_SCALE: i128 = 10_000;

/// Decimal places held by a [`UnitPrice`].
pub const PRICE_DECIMALS: usize = 4;

/// [`UnitPrice`] steps in one currency unit.
pub const PRICE_SCALE: i64 = 10_000;

/// [`UnitPrice`] steps in one cent.
const STEPS_PER_CENT: i128 = (PRICE_SCALE / 100) as i128;

// =============================================================================
// Rounding
// =============================================================================

/// Divides `numerator` by `denominator` and rounds half away from zero.
///
/// `denominator` must be positive. Results beyond `i64` saturate.
///
/// ```text
///   1039500 / 10000 = 103.95  →  104
///  -1039500 / 10000 = -103.95 → -104
///     5000 / 10000 = 0.5      →   1
/// ```
pub(crate) fn round_half_away(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator > 0);
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        numerator.saturating_add(half) / denominator
    } else {
        numerator.saturating_sub(half) / denominator
    };
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative prices and quantities pass through the
///   pipeline arithmetically, so amounts may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating**: `+` and `-` stop at [`Money::MAX`] / [`Money::MIN`]
/// - **Serialized as a plain integer**: the sink decides how to display it
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► PricedLine.net_amount ──┬──► TicketTotals.total_net
///                    └─► PricedLine.gross_amount ┼──► TicketTotals.total_gross
///                                                └──► TaxCategoryAmount.amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use ticket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    ///
    /// ```rust
    /// use ticket_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Calculates the tax owed on this amount, rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use ticket_core::money::Money;
    /// use ticket_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(1000); // 10.00
    /// let rate = TaxRate::from_bps(2100);  // 21%
    ///
    /// assert_eq!(price.calculate_tax(rate).cents(), 210);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(round_half_away(
            self.0 as i128 * rate.bps() as i128,
            BPS_SCALE,
        ))
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// Price of one unit before tax, with [`PRICE_DECIMALS`] decimal places.
///
/// Finer than [`Money`] so per-weight prices such as 0.333 survive until
/// the line amount is rounded to cents.
///
/// ## Serialized Form
/// Written as a decimal string (`"0.333"`). Read from a string or a JSON
/// number (`0.333`, `12`). Numbers with more than four decimals are rounded
/// half away from zero; strings with more are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitPrice(i64);

impl UnitPrice {
    /// Creates a price from ten-thousandths of a currency unit.
    #[inline]
    pub const fn from_scaled(scaled: i64) -> Self {
        UnitPrice(scaled)
    }

    /// Creates a price from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        UnitPrice(units.saturating_mul(PRICE_SCALE))
    }

    /// Checks if the price is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Tax on one unit, rounded to cents.
    ///
    /// ```rust
    /// use ticket_core::money::UnitPrice;
    /// use ticket_core::types::TaxRate;
    ///
    /// let price = UnitPrice::from_units(10);
    /// assert_eq!(price.calculate_tax(TaxRate::from_bps(2100)).cents(), 210);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(round_half_away(
            self.0 as i128 * rate.bps() as i128,
            BPS_SCALE * STEPS_PER_CENT,
        ))
    }

    /// Returns `price × qty`, rounded to cents.
    ///
    /// ```rust
    /// use ticket_core::money::UnitPrice;
    ///
    /// let price: UnitPrice = "0.333".parse().unwrap();
    /// assert_eq!(price.net_for_quantity(3).cents(), 100); // 0.999 → 1.00
    /// ```
    pub fn net_for_quantity(&self, qty: i64) -> Money {
        Money(round_half_away(
            self.0 as i128 * qty as i128,
            STEPS_PER_CENT,
        ))
    }

    /// Returns `(price + price × rate) × qty`, rounded to cents once at the end.
    ///
    /// The per-unit tax is never rounded on its own: the whole product is
    /// computed exactly in i128 before the single rounding step.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Aceite 4.99, superReducedA (5%)
    /// Quantity: 3
    ///      │
    ///      ▼
    /// gross_for_quantity(5%, 3) ← THIS FUNCTION
    ///      │   49900 × 10500 × 3 / 1000000 = 1571.85
    ///      ▼
    /// Gross: 15.72
    /// ```
    pub fn gross_for_quantity(&self, rate: TaxRate, qty: i64) -> Money {
        let factor = BPS_SCALE + rate.bps() as i128;
        Money(round_half_away(
            (self.0 as i128 * qty as i128).saturating_mul(factor),
            BPS_SCALE * STEPS_PER_CENT,
        ))
    }

    /// Converts a JSON-style float, rounding to [`PRICE_DECIMALS`] places.
    ///
    /// Returns `None` for NaN and infinities. Out of range values saturate.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(UnitPrice((value * PRICE_SCALE as f64).round() as i64))
    }
}

impl From<Money> for UnitPrice {
    fn from(money: Money) -> Self {
        UnitPrice(money.cents().saturating_mul(PRICE_SCALE / 100))
    }
}

/// Shortest decimal with at least two places: `"10.00"`, `"0.333"`.
impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = PRICE_SCALE as u64;

        let mut fraction = format!("{:0width$}", abs % scale, width = PRICE_DECIMALS);
        while fraction.len() > 2 && fraction.ends_with('0') {
            fraction.pop();
        }
        write!(f, "{}{}.{}", sign, abs / scale, fraction)
    }
}

/// Parses a plain decimal such as `"4.99"`, `"-1"` or `"0.0185"`.
impl FromStr for UnitPrice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPrice {
            value: s.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > PRICE_DECIMALS
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let padded = format!("{:0<width$}", fraction, width = PRICE_DECIMALS);
        let fraction: i64 = padded.parse().map_err(|_| invalid())?;

        let scaled = whole
            .checked_mul(PRICE_SCALE)
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(UnitPrice(if negative { -scaled } else { scaled }))
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UnitPriceVisitor)
    }
}

struct UnitPriceVisitor;

impl<'de> Visitor<'de> for UnitPriceVisitor {
    type Value = UnitPrice;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price such as 4.99 or \"0.333\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<UnitPrice, E> {
        Ok(UnitPrice::from_units(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<UnitPrice, E> {
        Ok(UnitPrice::from_units(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<UnitPrice, E> {
        UnitPrice::from_f64(v).ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<UnitPrice, E> {
        v.parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two places, no currency symbol.
///
/// Currency symbols and layout belong to the sink.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
