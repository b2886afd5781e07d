//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    858 × 0.7 = 600.5999999999999                                        │
//! │    450 × 1.1 = 495.00000000000006                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents × Basis Points                             │
//! │    858 × 7000 bps = 6_006_000 → (6_006_000 + 5000) / 10_000 = 601      │
//! │    Every rounding step is exact and reproducible                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sticker_core::money::Money;
//! use sticker_core::types::{Coefficient, DiscountRate};
//!
//! let base = Money::from_cents(650);
//! let priced = base.apply_coefficients(Coefficient::from_bps(12_000), Coefficient::from_bps(11_000));
//! assert_eq!(priced.cents(), 858);
//!
//! let unit = priced.apply_discount(DiscountRate::from_percent(30));
//! assert_eq!(unit.cents(), 601);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Coefficient, DiscountRate, BPS_SCALE};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Where Money is Used
/// ```text
/// base price (size) ──► × material × shape ──► round ──► × (1 - discount) ──► round
///                                                                  │
///                                                                  ▼
///                                                        unit price × quantity
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::Money;
    ///
    /// let price = Money::from_cents(450); // 4.50 EUR
    /// assert_eq!(price.cents(), 450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole euros portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Scales by a single coefficient, rounding half up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::Money;
    /// use sticker_core::types::Coefficient;
    ///
    /// let base = Money::from_cents(450);
    /// assert_eq!(base.apply_coefficient(Coefficient::from_bps(10_800)).cents(), 486);
    /// ```
    pub fn apply_coefficient(&self, coefficient: Coefficient) -> Money {
        let scaled = self.0 as i128 * coefficient.bps() as i128;
        Money::from_cents(round_half_up(scaled, BPS_SCALE as i128))
    }

    /// Scales by two coefficients and rounds once, after both are applied.
    pub fn apply_coefficients(&self, first: Coefficient, second: Coefficient) -> Money {
        let scaled = self.0 as i128 * first.bps() as i128 * second.bps() as i128;
        let scale = BPS_SCALE as i128 * BPS_SCALE as i128;
        Money::from_cents(round_half_up(scaled, scale))
    }

    /// Applies a discount and returns the remaining amount, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::Money;
    /// use sticker_core::types::DiscountRate;
    ///
    /// let price = Money::from_cents(450);
    /// assert_eq!(price.apply_discount(DiscountRate::from_percent(22)).cents(), 351);
    /// ```
    pub fn apply_discount(&self, discount: DiscountRate) -> Money {
        let remaining_bps = BPS_SCALE.saturating_sub(discount.bps());
        let scaled = self.0 as i128 * remaining_bps as i128;
        Money::from_cents(round_half_up(scaled, BPS_SCALE as i128))
    }

    /// Multiplies a unit price by a quantity. Exact, no rounding.
    ///
    /// Saturates at the `i64` range; validated tables never get there.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

/// Divides and rounds half up (toward +infinity on ties).
///
/// `div_euclid` floors, so `floor((n + d/2) / d)` is half-up for either sign.
/// Results outside the `i64` range saturate.
fn round_half_up(numerator: i128, denominator: i128) -> i64 {
    let rounded = numerator.saturating_add(denominator / 2).div_euclid(denominator);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug display only; the storefront formats prices per locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
