//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    220 × 0.18 = 39.599999999999994  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents do not help either: a price is multiplied by an FX      │
//! │  rate (83.1245) and a margin (1.125) before tax, so every step would   │
//! │  need its own rounding rule.                                           │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals                                          │
//! │    220 × 0.18 = 39.60 exactly                                          │
//! │    Rounding to 2 places happens only when a value is displayed         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use avquote_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(1099);          // 10.99
//! let doubled = price * 2;                       // 21.98
//! let total = price + Money::from_cents(500);    // 15.99
//! assert_eq!(total.amount(), Decimal::new(1599, 2));
//! assert_eq!(doubled.to_string(), "21.98");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::types::{ExchangeRate, Margin, TaxRate};

/// Decimal places shown for every monetary value.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whatever currency the surrounding context implies.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative prices and markdowns compute through
/// - **No implicit rounding**: arithmetic is exact, [`Money::rounded`] is explicit
/// - **Transparent serde**: reads `1500`, `1500.5` or `"1500.50"` from JSON
///
/// ## Panics
/// Multiplication panics if the result exceeds `Decimal::MAX`. Inputs that
/// pass [`crate::validation`] (`MAX_UNIT_PRICE`, `MAX_EXCHANGE_RATE`,
/// `MAX_MARGIN_PERCENT`, `MAX_ITEM_QUANTITY`) stay about six orders of
/// magnitude below that bound.
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.unit_price ──► convert(rate) ──► apply_margin(m) ──► × qty   │
/// │                                                           │             │
/// │                                   calculate_tax(rate) ◄───┘             │
/// │                                           │                             │
/// │                            RoomTotals ◄───┴──► ProjectTotal            │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from hundredths of the currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds half away from zero to [`DISPLAY_DECIMALS`] places.
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let raw = Money::new(Decimal::new(12345, 3)); // 12.345
    /// assert_eq!(raw.rounded(), Money::from_cents(1235));
    /// ```
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Lossy conversion for spreadsheet cells, which only store IEEE doubles.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }

    /// Calculates tax on this amount.
    ///
    /// The result is exact; no rounding is applied.
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    /// use avquote_core::types::TaxRate;
    ///
    /// let extended = Money::from_units(220);
    /// let tax = extended.calculate_tax(TaxRate::from_bps(1800)); // 18%
    /// assert_eq!(tax, Money::from_cents(3960));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.as_fraction())
    }

    /// Multiplies money by a quantity. Panics on `Decimal` overflow.
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Converts a source-currency amount with an exchange rate. Panics on
    /// `Decimal` overflow.
    #[inline]
    pub fn convert(&self, rate: ExchangeRate) -> Money {
        Money(self.0 * rate.value())
    }

    /// Applies a percentage markup (or markdown, for negative margins).
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    /// use avquote_core::types::Margin;
    ///
    /// let cost = Money::from_units(100);
    /// assert_eq!(cost.apply_margin(Margin::from_units(10)), Money::from_units(110));
    /// ```
    #[inline]
    pub fn apply_margin(&self, margin: Margin) -> Money {
        Money(self.0 * margin.multiplier())
    }

    /// Formats the rounded amount with a currency symbol and thousands separators.
    ///
    /// ## Example
    /// ```rust
    /// use avquote_core::money::Money;
    ///
    /// let total = Money::from_cents(123456789);
    /// assert_eq!(total.format_with_symbol("₹"), "₹1,234,567.89");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("$"), "-$5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded().0.abs();
        let text = format!("{:.2}", rounded);
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, digit) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.rounded().is_negative() { "-" } else { "" };
        format!("{sign}{symbol}{grouped}.{fraction}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no symbol. Use
/// [`Money::format_with_symbol`] for user-facing output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded().0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_units(5).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(10);
        let b = Money::from_units(5);

        assert_eq!(a + b, Money::from_units(15));
        assert_eq!(a - b, Money::from_units(5));
        assert_eq!(a * 3, Money::from_units(30));
        assert_eq!(-a, Money::from_units(-10));
    }

    #[test]
    fn test_tax_is_exact() {
        // The float version of this is 39.599999999999994
        let tax = Money::from_units(220).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.amount(), dec!(39.6));
    }

    #[test]
    fn test_convert_and_margin() {
        let price = Money::from_units(100);
        let converted = price.convert(ExchangeRate::new(dec!(83.5)));
        assert_eq!(converted.amount(), dec!(8350));

        let marked_up = converted.apply_margin(Margin::from_percent(dec!(12.5)));
        assert_eq!(marked_up.amount(), dec!(9393.75));
    }

    #[test]
    fn test_negative_margin_is_a_markdown() {
        let price = Money::from_units(200);
        let marked_down = price.apply_margin(Margin::from_units(-25));
        assert_eq!(marked_down, Money::from_units(150));
    }

    #[test]
    fn test_rounding_is_display_only() {
        let raw = Money::new(dec!(0.125));
        assert_eq!(raw.amount(), dec!(0.125));
        assert_eq!(raw.rounded().amount(), dec!(0.13));
        assert_eq!(raw.to_string(), "0.13");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), Money::from_cents(100));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(150), Money::from_cents(250), Money::from_cents(-100)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(300));
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(0).format_with_symbol("$"), "$0.00");
        assert_eq!(Money::from_cents(99999).format_with_symbol("€"), "€999.99");
        assert_eq!(Money::from_cents(100000).format_with_symbol("€"), "€1,000.00");
        assert_eq!(Money::from_units(1234567).format_with_symbol(""), "1,234,567.00");
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_int: Money = serde_json::from_str("1500").unwrap();
        let from_str: Money = serde_json::from_str("\"1500.50\"").unwrap();
        assert_eq!(from_int, Money::from_units(1500));
        assert_eq!(from_str, Money::from_cents(150050));
    }
}
