//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers (e.g. `109.95`). They are held as a
//! [`Decimal`] so that line totals and subtotals add up exactly. Cartwheel is
//! single-currency; prices display with a `$` prefix and two decimals.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A unit or line price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero price, the subtotal of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g. "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// Catalog prices are unbounded, so totals saturate at the `Decimal` range
// instead of overflowing.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(1000).display(), "$10.00");
        assert_eq!(Price::from_cents(1995).display(), "$19.95");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(10995).amount(), Decimal::new(10995, 2));
    }

    #[test]
    fn test_line_total_is_exact() {
        // 3 x 0.10 must not drift the way binary floats do
        assert_eq!(Price::from_cents(10) * 3, Price::from_cents(30));
    }

    #[test]
    fn test_totals_saturate_at_decimal_max() {
        let huge: Price =
            serde_json::from_str("50000000000000000000000000000").expect("deserialize");
        assert_eq!(huge * 2, Price(Decimal::MAX));
        assert_eq!(huge + huge, Price(Decimal::MAX));
        assert_eq!([huge, huge, huge].into_iter().sum::<Price>(), Price(Decimal::MAX));
        assert!(Price(Decimal::MAX).display().starts_with('$'));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(150), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(400));
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("109.95").expect("deserialize");
        assert_eq!(price, Price::from_cents(10995));

        let whole: Price = serde_json::from_str("22").expect("deserialize");
        assert_eq!(whole.display(), "$22.00");
    }

    #[test]
    fn test_deserialize_rejects_text() {
        assert!(serde_json::from_str::<Price>("\"cheap\"").is_err());
    }
}
