//! Monetary amount units.
//!
//! Host orders carry decimal major-unit amounts ([`FloatMajorUnit`]); vendor
//! APIs expect whole minor-unit integers ([`MinorUnit`]). Conversion between
//! the two is currency aware: zero-decimal currencies keep the major value,
//! three-decimal currencies scale by 1000 and everything else by 100.

use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

use crate::enums::Currency;

/// An amount expressed in the smallest denomination of its currency,
/// e.g. cents for USD.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Forms a new minor unit from an amount.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Gets the amount as a plain i64.
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MinorUnit {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for MinorUnit {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// An amount expressed in decimal major units, e.g. dollars for USD.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    /// Forms a new major unit from a decimal amount.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// A zero amount.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Gets the amount as a plain f64.
    pub fn get_amount_as_f64(self) -> f64 {
        self.0
    }

    /// Converts the amount to the minor denomination of `currency`, rounding
    /// to the nearest whole minor unit.
    pub fn to_minor_unit(self, currency: Currency) -> MinorUnit {
        let multiplier = if currency.is_zero_decimal_currency() {
            1.0
        } else if currency.is_three_decimal_currency() {
            1000.0
        } else {
            100.0
        };
        MinorUnit::new((self.0 * multiplier).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_currency_scales_by_hundred() {
        assert_eq!(
            FloatMajorUnit::new(10.0).to_minor_unit(Currency::USD),
            MinorUnit::new(1000)
        );
    }

    #[test]
    fn conversion_rounds_instead_of_truncating() {
        // 19.99 * 100.0 is 1998.9999... in binary floating point
        assert_eq!(
            FloatMajorUnit::new(19.99).to_minor_unit(Currency::EUR),
            MinorUnit::new(1999)
        );
        assert_eq!(
            FloatMajorUnit::new(0.1).to_minor_unit(Currency::GBP),
            MinorUnit::new(10)
        );
    }

    #[test]
    fn zero_decimal_currency_keeps_major_value() {
        assert_eq!(
            FloatMajorUnit::new(1500.0).to_minor_unit(Currency::JPY),
            MinorUnit::new(1500)
        );
    }

    #[test]
    fn three_decimal_currency_scales_by_thousand() {
        assert_eq!(
            FloatMajorUnit::new(1.234).to_minor_unit(Currency::BHD),
            MinorUnit::new(1234)
        );
    }

    #[test]
    fn non_negative_input_stays_non_negative() {
        assert!(
            FloatMajorUnit::zero()
                .to_minor_unit(Currency::USD)
                .get_amount_as_i64()
                >= 0
        );
        assert!(
            FloatMajorUnit::new(0.004)
                .to_minor_unit(Currency::USD)
                .get_amount_as_i64()
                >= 0
        );
    }

    #[test]
    fn minor_unit_arithmetic() {
        let total = MinorUnit::new(1999) + MinorUnit::new(1);
        assert_eq!(total - MinorUnit::new(2000), MinorUnit::new(0));
    }
}
