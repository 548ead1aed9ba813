//! # Money Module
//!
//! Provides the `Amount` and `Rate` types for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    35.00 × 1.5 × 0.825 × 0.8 = 34.650000000000006  ❌ WRONG!            │
//! │                                                                         │
//! │  Pricing is a CHAIN of multiplications (category, subscription,        │
//! │  voucher). Every link in a float chain adds representation drift,      │
//! │  and the drift surfaces when the total is rounded for display.         │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    35.00 × 1.5 × 0.825 × 0.8 = 34.65000   (exact, scale grows)          │
//! │    Rounding happens ONCE, at display time, half away from zero.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use encore_core::money::{Amount, Rate};
//! use rust_decimal_macros::dec;
//!
//! let unit = Amount::from_decimal(dec!(35.00));
//! let premium = unit.apply(Rate::from_decimal(dec!(1.5)));
//! let total = (premium + unit).apply(Rate::discount_percent(dec!(17.5)));
//!
//! assert_eq!(total.to_display(), "72.19");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of fractional digits shown on receipts.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Amount Type
// =============================================================================

/// A monetary value, kept at full decimal precision until displayed.
///
/// ## Design Decisions
/// - **Decimal, not cents**: discount chains produce fractions of a cent
///   (`140.00 × 0.825 = 115.500`). Keeping the full scale means the only
///   rounding step is [`Amount::to_display`].
/// - **No currency**: single-currency system; the caller appends the symbol.
/// - **Serde**: serialized as a decimal string, never as a JSON float.
///
/// ## Where Amount is Used
/// ```text
/// PriceCatalog::base_price ──► × category ──► Σ seats = subtotal
///                                                 │
///                        × (1 - subscriber) ◄─────┘
///                                 │
///                        × (1 - voucher) ──► total ──► "115.50€"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Returns a zero amount.
    ///
    /// ```rust
    /// use encore_core::money::Amount;
    ///
    /// assert!(Amount::zero().is_zero());
    /// assert_eq!(Amount::zero().to_display(), "0.00");
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    /// Wraps an exact decimal value.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the unrounded decimal value.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies the amount by a rate (`a × r`).
    ///
    /// ## Example
    /// ```rust
    /// use encore_core::money::{Amount, Rate};
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Amount::from_decimal(dec!(25.95));
    /// let discounted = price.apply(Rate::discount_percent(dec!(20)));
    /// assert_eq!(discounted, Amount::from_decimal(dec!(20.76)));
    /// ```
    #[inline]
    pub fn apply(self, rate: Rate) -> Self {
        Amount(self.0 * rate.0)
    }

    /// Rounds to [`DISPLAY_DECIMALS`] places, half away from zero.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Canonical two-decimal rendering (no currency symbol).
    ///
    /// ## Rounding
    /// ```text
    /// 2.005 → "2.01"     (half rounds away from zero)
    /// 2.004 → "2.00"
    /// 115.5 → "115.50"   (always two digits)
    /// ```
    pub fn to_display(&self) -> String {
        format!("{:.2}", self.rounded())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal("amount", s).map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl Mul<Rate> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, rate: Rate) -> Self {
        self.apply(rate)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A dimensionless multiplier: category ratio, discount factor, voucher rate.
///
/// Discounts are stored as the factor to multiply by, so a 17.5 % discount
/// is the rate `0.825` (see [`Rate::discount_percent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// The neutral multiplier.
    #[inline]
    pub const fn one() -> Self {
        Rate(Decimal::ONE)
    }

    /// A rate of zero (e.g. no voucher in effect).
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Wraps an exact decimal rate.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Rate(value)
    }

    /// Returns the decimal value.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Converts a percentage discount into the factor `1 - p/100`.
    ///
    /// ```rust
    /// use encore_core::money::Rate;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Rate::discount_percent(dec!(25)), Rate::from_decimal(dec!(0.75)));
    /// ```
    pub fn discount_percent(percent: Decimal) -> Self {
        Rate(Decimal::ONE - percent / dec!(100))
    }

    /// Returns `1 - self`, turning a discount rate into its factor.
    #[inline]
    pub fn complement(self) -> Self {
        Rate::one() - self
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Rate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal("rate", s).map(Rate)
    }
}

impl Add for Rate {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Rate(self.0 + other.0)
    }
}

impl Sub for Rate {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Rate(self.0 - other.0)
    }
}

impl Mul for Rate {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Rate(self.0 * other.0)
    }
}

fn parse_decimal(field: &str, s: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(s.trim()).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn rate(s: &str) -> Rate {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_amounts() {
        assert_eq!(amount("25.99") + amount("59.99"), amount("85.98"));
    }

    #[test]
    fn test_add_nothing() {
        let a = amount("25.99");
        assert_eq!(a + Amount::zero(), a);
    }

    #[test]
    fn test_apply_discount_rate() {
        let discounted = amount("25.95").apply(Rate::discount_percent(dec!(20)));
        assert_eq!(discounted, amount("20.76"));
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(amount("2.005").to_display(), "2.01");
        assert_eq!(amount("2.004").to_display(), "2.00");
        assert_eq!(amount("2.015").to_display(), "2.02");
        assert_eq!(amount("-2.005").to_display(), "-2.01");
    }

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(amount("115.5").to_display(), "115.50");
        assert_eq!(amount("140").to_display(), "140.00");
        assert_eq!(format!("{}", amount("0.1")), "0.10");
    }

    #[test]
    fn test_no_float_drift_in_discount_chain() {
        // 0.1 + 0.2 is the classic float trap
        assert_eq!(amount("0.1") + amount("0.2"), amount("0.3"));

        let total = amount("35.00")
            .apply(rate("1.5"))
            .apply(Rate::discount_percent(dec!(17.5)))
            .apply(rate("0.8"));
        assert_eq!(total.as_decimal(), dec!(34.65));
    }

    #[test]
    fn test_sum_of_amounts() {
        let total: Amount = ["1.10", "2.20", "3.30"].iter().map(|s| amount(s)).sum();
        assert_eq!(total, amount("6.60"));

        let empty: Amount = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_rate_arithmetic() {
        assert_eq!(rate("0.15") + rate("0.2"), rate("0.35"));
        assert_eq!(rate("0.15") * rate("0.5"), rate("0.075"));
        assert_eq!(Rate::one() - rate("0.2"), rate("0.8"));
        assert_eq!(rate("0.2").complement(), rate("0.8"));
    }

    #[test]
    fn test_discount_percent_rate() {
        assert_eq!(Rate::discount_percent(dec!(25)), rate("0.75"));
        assert_eq!(Rate::discount_percent(dec!(17.5)), rate("0.825"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "12,50".parse::<Amount>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert!("abc".parse::<Rate>().is_err());
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&amount("115.50")).unwrap();
        assert_eq!(json, "\"115.50\"");
    }
}
