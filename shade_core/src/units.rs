//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities the estimator moves
//! around. They serialize as bare numbers so the JSON stays clean.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::units::{SqFt, Usd};
//!
//! let area = SqFt(12.0 * 12.0);
//! let infill = Usd(9.0) * area.0;
//! assert_eq!(infill.round_to(50.0), Usd(1300.0));
//! assert_eq!(Usd(12345.0).to_string(), "$12,345");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Area
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

// ============================================================================
// Money
// ============================================================================

/// US dollars. Kept as `f64` through the multiplier chain and rounded once
/// at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Usd(pub f64);

impl Usd {
    pub const ZERO: Usd = Usd(0.0);

    /// Round to the nearest multiple of `increment` (half away from zero).
    ///
    /// A non-positive increment leaves the value untouched.
    pub fn round_to(self, increment: f64) -> Usd {
        if increment <= 0.0 {
            return self;
        }
        Usd((self.0 / increment).round() * increment)
    }

    /// Whether the amount is an exact multiple of `increment`.
    pub fn is_multiple_of(self, increment: f64) -> bool {
        increment > 0.0 && (self.0 / increment).fract() == 0.0
    }
}

impl fmt::Display for Usd {
    /// Whole dollars with thousands separators, e.g. `$12,350`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.round() as i64;
        let digits = whole.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if whole < 0 {
            write!(f, "-${}", grouped)
        } else {
            write!(f, "${}", grouped)
        }
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(SqFt);
impl_arithmetic!(Usd);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_increment() {
        assert_eq!(Usd(2736.0).round_to(50.0), Usd(2750.0));
        assert_eq!(Usd(2724.9).round_to(50.0), Usd(2700.0));
        assert_eq!(Usd(25.0).round_to(50.0), Usd(50.0));
        assert_eq!(Usd(0.0).round_to(50.0), Usd(0.0));
        assert_eq!(Usd(123.4).round_to(0.0), Usd(123.4));
    }

    #[test]
    fn test_is_multiple_of() {
        assert!(Usd(1350.0).is_multiple_of(50.0));
        assert!(!Usd(1351.0).is_multiple_of(50.0));
        assert!(!Usd(100.0).is_multiple_of(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Usd(0.0).to_string(), "$0");
        assert_eq!(Usd(950.0).to_string(), "$950");
        assert_eq!(Usd(12350.0).to_string(), "$12,350");
        assert_eq!(Usd(1234567.4).to_string(), "$1,234,567");
        assert_eq!(Usd(-1500.0).to_string(), "-$1,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Usd(100.0);
        let b = Usd(50.0);
        assert_eq!((a + b).0, 150.0);
        assert_eq!((a - b).0, 50.0);
        assert_eq!((a * 1.5).0, 150.0);
        assert_eq!((SqFt(144.0) / 2.0).0, 72.0);
        assert_eq!(SqFt(144.0).value(), 144.0);
    }

    #[test]
    fn test_serialization() {
        let usd = Usd(1250.0);
        let json = serde_json::to_string(&usd).unwrap();
        assert_eq!(json, "1250.0");
        let roundtrip: Usd = serde_json::from_str(&json).unwrap();
        assert_eq!(usd, roundtrip);
    }
}
