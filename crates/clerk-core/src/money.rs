//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integers in the smallest currency unit                   │
//! │    A cart line of 3 × 1000 is exactly 3000 - no drift, ever.           │
//! │                                                                         │
//! │  The backend deals in whole units of a subunit-less currency, so the   │
//! │  smallest unit here is simply "one". The type works the same for       │
//! │  cent-based currencies.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use clerk_core::money::Money;
//!
//! // Create from the smallest unit (never from floats!)
//! let price = Money::from_amount(1000);
//!
//! // Arithmetic operations
//! let line_total = price * 3;
//! assert_eq!(line_total.amount(), 3000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a bare integer, exactly the way
///   the backend API transmits prices and totals
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total()
///                                                 │
///                         Cart.total() ◄──────────┘
///                              │
///                              ▼
///                   SaleDraft.total_amount ──► POST /sales
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use clerk_core::money::Money;
    ///
    /// let price = Money::from_amount(1000);
    /// assert_eq!(price.amount(), 1000);
    /// ```
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Checks whether the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether the amount is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

/// Quantity multiplication: `unit_price * quantity`.
impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats the amount with thousands separators, e.g. `12,500`.
///
/// The currency symbol is a presentation concern and is appended by the
/// terminal, not here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        if negative {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amount() {
        let m = Money::from_amount(1000);
        assert_eq!(m.amount(), 1000);
        assert!(!m.is_zero());
        assert!(Money::ZERO.is_zero());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_amount(1000);
        let b = Money::from_amount(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((a * 3).amount(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.amount(), 1500);
        c -= b;
        assert_eq!(c.amount(), 1000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|&n| Money::from_amount(n))
            .sum();
        assert_eq!(total.amount(), 600);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert_eq!(empty, Money::ZERO);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_amount(0).to_string(), "0");
        assert_eq!(Money::from_amount(999).to_string(), "999");
        assert_eq!(Money::from_amount(1000).to_string(), "1,000");
        assert_eq!(Money::from_amount(1234567).to_string(), "1,234,567");
        assert_eq!(Money::from_amount(-12500).to_string(), "-12,500");
    }

    #[test]
    fn test_serde_transparent() {
        let m = Money::from_amount(2500);
        // Serializes as a bare integer, the way the backend sends prices.
        assert_eq!(serde_json::to_string(&m).unwrap(), "2500");
        let back: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(back, m);
    }
}
