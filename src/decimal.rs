//! Fixed two-decimal rendering for monetary amounts.
//!
//! Amounts are accumulated as `f64` because that is what the log stores.
//! `Money2` converts the exact binary value to `rust_decimal::Decimal` only
//! for display, then rounds half away from zero. A double that sits just
//! below a midpoint (1.005 is really 1.00499...) therefore rounds down.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;

/// An amount rendered with exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use mps7_ledger::Money2;
///
/// assert_eq!(Money2::from_f64(60.0).to_string(), "60.00");
/// assert_eq!(Money2::from_f64(-0.125).to_string(), "-0.13");
/// assert_eq!(Money2::from_f64(1.005).to_string(), "1.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money2(Repr);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    /// Rounded magnitude; the sign is kept apart so that small negative
    /// values still print as "-0.00".
    Decimal { magnitude: Decimal, negative: bool },
    // Non-finite or beyond Decimal's range.
    Float(f64),
}

impl Money2 {
    /// The number of decimal places rendered.
    pub const SCALE: u32 = 2;

    /// Rounds `value` half away from zero to 2 places.
    pub fn from_f64(value: f64) -> Self {
        match Decimal::from_f64_retain(value.abs()) {
            Some(d) => {
                let mut magnitude =
                    d.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
                magnitude.rescale(Self::SCALE);
                Money2(Repr::Decimal {
                    magnitude,
                    negative: value < 0.0,
                })
            }
            None => Money2(Repr::Float(value)),
        }
    }
}

impl fmt::Display for Money2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Decimal {
                magnitude,
                negative,
            } => {
                if negative {
                    write!(f, "-")?;
                }
                write!(f, "{:.2}", magnitude)
            }
            Repr::Float(v) => write!(f, "{:.2}", v),
        }
    }
}

impl Serialize for Money2 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts_get_two_places() {
        assert_eq!(Money2::from_f64(0.0).to_string(), "0.00");
        assert_eq!(Money2::from_f64(100.0).to_string(), "100.00");
        assert_eq!(Money2::from_f64(-40.0).to_string(), "-40.00");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(Money2::from_f64(0.125).to_string(), "0.13");
        assert_eq!(Money2::from_f64(-1.125).to_string(), "-1.13");
        assert_eq!(Money2::from_f64(1.234).to_string(), "1.23");
    }

    #[test]
    fn test_near_ties_round_on_binary_value() {
        assert_eq!(Money2::from_f64(1.005).to_string(), "1.00");
        assert_eq!(Money2::from_f64(2.675).to_string(), "2.67");
        assert_eq!(Money2::from_f64(1.015).to_string(), "1.01");
        assert_eq!(Money2::from_f64(-2.675).to_string(), "-2.67");
    }

    #[test]
    fn test_tiny_negative_keeps_sign() {
        assert_eq!(Money2::from_f64(-0.001).to_string(), "-0.00");
        assert_eq!(Money2::from_f64(-0.0).to_string(), "0.00");
    }

    #[test]
    fn test_accumulated_float_noise_is_hidden() {
        let sum = 0.1 + 0.2;
        assert_eq!(Money2::from_f64(sum).to_string(), "0.30");
    }

    #[test]
    fn test_non_finite_falls_back_to_float() {
        assert_eq!(Money2::from_f64(f64::INFINITY).to_string(), "inf");
        assert_eq!(Money2::from_f64(f64::NAN).to_string(), "NaN");
    }
}
