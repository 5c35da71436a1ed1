//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! `Percent` type used for the cart discount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All arithmetic happens on i64 cents. The backend wire format uses    │
//! │    decimal major units, so conversion happens exactly once, at the      │
//! │    serde boundary (see [`as_major_units`]).                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vela_core::money::{Money, Percent};
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3;                // $32.97
//!
//! // Ten percent discount on $30.00 is $3.00
//! let discount = Money::from_cents(3000).percentage(Percent::from_percent(10.0));
//! assert_eq!(discount.cents(), 300);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as raw cents unless the
///   field opts into [`as_major_units`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal major-unit amount, rounding to
    /// the nearest cent. This is the ONLY place floats enter the money
    /// system, and it exists solely because the backend wire format sends
    /// prices as decimal numbers.
    pub fn from_major_units(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal major units, for the wire only.
    #[inline]
    pub fn major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given percentage of this amount, rounded to the nearest
    /// cent.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides half-up rounding (5000/10000 = 0.5). i128 keeps
    /// large subtotals from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::{Money, Percent};
    ///
    /// let subtotal = Money::from_cents(3000);            // $30.00
    /// let off = subtotal.percentage(Percent::from_percent(10.0));
    /// assert_eq!(off.cents(), 300);                      // $3.00
    /// ```
    pub fn percentage(&self, rate: Percent) -> Money {
        let part = (self.0 as i128 * rate.basis_points() as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }
}

// =============================================================================
// Percent Type
// =============================================================================

/// A percentage in the closed range `[0, 100]`, stored as basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. Storing `u32` bps keeps fractional
/// percentages (e.g. a 2.5% promotion) exact, with no float drift.
///
/// ## Clamping, Not Rejecting
/// Construction from a raw percentage clamps out-of-range input instead of
/// failing. The discount field on the POS screen feeds straight in here;
/// typing "150" silently becomes 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percent(u32);

/// Upper bound in basis points (100%).
const MAX_BPS: u32 = 10_000;

impl Percent {
    /// Creates a percentage from a possibly-fractional percent value,
    /// clamping into `[0, 100]`.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Percent;
    ///
    /// assert_eq!(Percent::from_percent(10.0).basis_points(), 1000);
    /// assert_eq!(Percent::from_percent(-3.0).basis_points(), 0);
    /// assert_eq!(Percent::from_percent(250.0).basis_points(), 10_000);
    /// ```
    pub fn from_percent(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Percent(0);
        }
        let bps = (pct * 100.0).round() as u64;
        Percent(bps.min(MAX_BPS as u64) as u32)
    }

    /// Creates a percentage directly from basis points, clamped to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > MAX_BPS {
            Percent(MAX_BPS)
        } else {
            Percent(bps)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Wire Serialization Helper
// =============================================================================

/// Serde adapter for fields the backend sends as decimal major units.
///
/// The backend's `precio` / `total` fields are plain JSON numbers in
/// dollars; internally everything is integer cents. Annotate wire-model
/// fields with `#[serde(with = "vela_core::money::as_major_units")]`.
pub mod as_major_units {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_f64(money.major_units())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(de)?;
        Ok(Money::from_major_units(amount))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
/// This is for debugging and log lines; UI display belongs to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
