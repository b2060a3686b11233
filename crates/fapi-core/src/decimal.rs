//! Precision-safe decimal types for order fields.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. The exchange parses
//! numeric fields as decimal literals and rejects exponent notation, so
//! everything that goes on the wire passes through [`fixed_point`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Minimum number of fractional digits rendered on the wire.
pub const WIRE_MIN_SCALE: u32 = 6;

/// Render a decimal in fixed-point form with at least [`WIRE_MIN_SCALE`]
/// fractional digits. Values with a larger scale keep all their digits.
pub fn fixed_point(value: Decimal) -> String {
    let mut value = value;
    if value.scale() < WIRE_MIN_SCALE {
        value.rescale(WIRE_MIN_SCALE);
    }
    value.to_string()
}

/// Largest number of fractional digits a `Decimal` can hold.
pub const MAX_SCALE: u32 = 28;

/// Parse a plain (`0.001`) or scientific (`1e-3`) decimal literal.
///
/// Plain literals with more than [`MAX_SCALE`] significant fractional
/// digits are rejected instead of rounded.
pub fn parse_decimal(s: &str) -> Result<Decimal, CoreError> {
    let trimmed = s.trim();
    if significant_fraction_digits(trimmed) > MAX_SCALE as usize {
        return Err(CoreError::TooPrecise {
            value: s.to_string(),
            max_scale: MAX_SCALE,
        });
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::InvalidDecimal(s.to_string()))
}

/// Fractional digits of a plain literal, trailing zeros excluded.
fn significant_fraction_digits(literal: &str) -> usize {
    if literal.contains(['e', 'E']) {
        return 0;
    }
    literal
        .split_once('.')
        .map(|(_, frac)| {
            frac.trim_end_matches('0')
                .chars()
                .filter(char::is_ascii_digit)
                .count()
        })
        .unwrap_or(0)
}

/// Limit or trigger price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Fixed-point wire representation.
    pub fn to_wire(&self) -> String {
        fixed_point(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Order quantity in contract units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub Decimal);

impl Quantity {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Fixed-point wire representation.
    pub fn to_wire(&self) -> String {
        fixed_point(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

impl From<Decimal> for Quantity {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_point_pads_to_six_places() {
        assert_eq!(fixed_point(dec!(0.001)), "0.001000");
        assert_eq!(fixed_point(dec!(0.0010)), "0.001000");
        assert_eq!(fixed_point(dec!(27000)), "27000.000000");
    }

    #[test]
    fn test_fixed_point_keeps_extra_precision() {
        assert_eq!(fixed_point(dec!(0.00000012)), "0.00000012");
    }

    #[test]
    fn test_scientific_input_renders_without_exponent() {
        let qty: Quantity = "1e-3".parse().unwrap();
        assert_eq!(qty.to_wire(), "0.001000");
        assert!(!qty.to_wire().contains('e'));

        let big: Price = "1.5E4".parse().unwrap();
        assert_eq!(big.to_wire(), "15000.000000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "abc".parse::<Quantity>(),
            Err(CoreError::InvalidDecimal("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        let input = "0.00000000000000000000000000001";
        assert_eq!(
            parse_decimal(input),
            Err(CoreError::TooPrecise {
                value: input.to_string(),
                max_scale: MAX_SCALE,
            })
        );

        // 28 digits still fit; trailing zeros beyond that are harmless.
        assert!(parse_decimal("0.0000000000000000000000000001").is_ok());
        assert_eq!(
            parse_decimal("1.50000000000000000000000000000000").unwrap(),
            dec!(1.5)
        );
    }

    #[test]
    fn test_is_positive() {
        assert!(Price::new(dec!(0.01)).is_positive());
        assert!(!Price::new(dec!(0)).is_positive());
        assert!(!Quantity::new(dec!(-1)).is_positive());
    }
}
