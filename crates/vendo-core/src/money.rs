//! # Money Module
//!
//! Provides the `Pence` type for monetary values and the `CoinSet` of
//! accepted denominations.
//!
//! ## Why Integer Money?
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                  │
//! │                                                              │
//! │  In floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                │
//! │                                                              │
//! │  A coin mechanism cannot pay out 0.30000000000000004 of      │
//! │  anything. Coins are whole pence, so the type is too.        │
//! │                                                              │
//! │  OUR SOLUTION: Integer Pence                                 │
//! │    80 + 20 = 100, exactly, every time                        │
//! │    Change is a list of whole coins that sums precisely       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Pence;
//!
//! let price = Pence::new(80);  // 80p
//! let paid = Pence::new(100);  // a £1 coin
//!
//! assert_eq!((paid - price).value(), 20);
//! assert_eq!(price.to_string(), "80p");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Pence Type
// =============================================================================

/// A monetary value in whole pence.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences like `deposited - price` are meaningful
///   when negative (a shortfall the consumer still owes)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Ord**: denominations sort naturally, which the change-maker relies on
///
/// ## Where Pence Flows
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  insert_coin(Pence) ──► deposited ──► deposited - price        │
/// │                                              │                 │
/// │  CoinBank bins (Pence ──► count) ◄── change ◄┘                 │
/// │                                                                │
/// │  EVERY monetary value in the machine flows through this type   │
/// └────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pence(i64);

impl Pence {
    /// Creates a value from whole pence.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Pence;
    ///
    /// let price = Pence::new(120); // £1.20
    /// assert_eq!(price.value(), 120);
    /// ```
    #[inline]
    pub const fn new(value: i64) -> Self {
        Pence(value)
    }

    /// Returns the raw value in pence.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Zero pence.
    #[inline]
    pub const fn zero() -> Self {
        Pence(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the amount the way it reads on the machine display, e.g. `80p`.
impl fmt::Display for Pence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

/// Default pence is zero.
impl Default for Pence {
    fn default() -> Self {
        Pence::zero()
    }
}

/// Addition of two Pence values.
impl Add for Pence {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Pence(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Pence {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Pence values.
impl Sub for Pence {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Pence(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Pence {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a coin count.
impl Mul<u32> for Pence {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Pence(self.0 * count as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Pence {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Pence(self.0 * count)
    }
}

/// Summation, so a change list can be totalled with `.sum()`.
impl Sum for Pence {
    fn sum<I: Iterator<Item = Pence>>(iter: I) -> Self {
        iter.fold(Pence::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Pence> for Pence {
    fn sum<I: Iterator<Item = &'a Pence>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Coin Set
// =============================================================================

/// The eight sterling coin denominations, smallest first.
pub const STERLING_COINS: [Pence; 8] = [
    Pence::new(1),
    Pence::new(2),
    Pence::new(5),
    Pence::new(10),
    Pence::new(20),
    Pence::new(50),
    Pence::new(100),
    Pence::new(200),
];

/// An immutable, ordered set of accepted coin denominations.
///
/// Shared by the coin bank and the vending machine: a coin outside this set
/// is rejected on deposit and never appears in change.
///
/// Construction normalizes the input: values are sorted ascending,
/// duplicates removed, non-positive values discarded. Deserialization goes
/// through the same normalization, so a hand-written config file cannot
/// smuggle in an unsorted or zero-valued denomination.
///
/// ## Example
/// ```rust
/// use vendo_core::money::{CoinSet, Pence};
///
/// let coins = CoinSet::sterling();
/// assert!(coins.contains(Pence::new(50)));
/// assert!(!coins.contains(Pence::new(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Pence>")]
pub struct CoinSet(Vec<Pence>);

impl CoinSet {
    /// Creates a set from arbitrary values, normalizing as described above.
    pub fn new(values: &[Pence]) -> Self {
        let mut values: Vec<Pence> = values.iter().copied().filter(Pence::is_positive).collect();
        values.sort_unstable();
        values.dedup();
        CoinSet(values)
    }

    /// The standard sterling coin set.
    pub fn sterling() -> Self {
        CoinSet::new(&STERLING_COINS)
    }

    /// Checks whether a coin value is an accepted denomination.
    #[inline]
    pub fn contains(&self, coin: Pence) -> bool {
        self.0.binary_search(&coin).is_ok()
    }

    /// Iterates denominations smallest first.
    pub fn iter(&self) -> impl Iterator<Item = Pence> + '_ {
        self.0.iter().copied()
    }

    /// Iterates denominations largest first, the order change-making wants.
    pub fn iter_descending(&self) -> impl Iterator<Item = Pence> + '_ {
        self.0.iter().rev().copied()
    }

    /// The denominations as an ascending slice.
    pub fn values(&self) -> &[Pence] {
        &self.0
    }

    /// Number of denominations in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Default coin set is sterling.
impl Default for CoinSet {
    fn default() -> Self {
        CoinSet::sterling()
    }
}

/// Conversion used by serde so deserialized sets are normalized too.
impl From<Vec<Pence>> for CoinSet {
    fn from(values: Vec<Pence>) -> Self {
        CoinSet::new(&values)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_value() {
        let price = Pence::new(80);
        assert_eq!(price.value(), 80);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Pence::new(80)), "80p");
        assert_eq!(format!("{}", Pence::new(0)), "0p");
        assert_eq!(format!("{}", Pence::new(-5)), "-5p");
        assert_eq!(format!("{}", Pence::new(200)), "200p");
    }

    #[test]
    fn test_arithmetic() {
        let a = Pence::new(100);
        let b = Pence::new(30);

        assert_eq!((a + b).value(), 130);
        assert_eq!((a - b).value(), 70);
        assert_eq!((b - a).value(), -70);

        let mut total = Pence::zero();
        total += a;
        total -= b;
        assert_eq!(total.value(), 70);

        assert_eq!((Pence::new(5) * 4u32).value(), 20);
        assert_eq!((Pence::new(5) * 4i64).value(), 20);
    }

    #[test]
    fn test_sum() {
        let change = vec![Pence::new(10), Pence::new(10), Pence::new(5)];
        let total: Pence = change.iter().sum();
        assert_eq!(total.value(), 25);

        let empty: Vec<Pence> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Pence>(), Pence::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Pence::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Pence::new(50);
        assert!(positive.is_positive());

        let negative = Pence::new(-50);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_sterling_set() {
        let coins = CoinSet::sterling();
        assert_eq!(coins.len(), 8);
        assert!(coins.contains(Pence::new(1)));
        assert!(coins.contains(Pence::new(200)));
        assert!(!coins.contains(Pence::new(3)));
        assert!(!coins.contains(Pence::new(0)));

        // Ascending by contract
        let values: Vec<i64> = coins.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![1, 2, 5, 10, 20, 50, 100, 200]);
    }

    #[test]
    fn test_coin_set_normalizes() {
        let coins = CoinSet::new(&[
            Pence::new(50),
            Pence::new(1),
            Pence::new(50),
            Pence::new(0),
            Pence::new(-2),
            Pence::new(5),
        ]);

        let values: Vec<i64> = coins.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![1, 5, 50]);
    }

    #[test]
    fn test_iter_descending() {
        let coins = CoinSet::sterling();
        let first = coins.iter_descending().next().unwrap();
        assert_eq!(first.value(), 200);
    }

    #[test]
    fn test_coin_set_deserialize_normalizes() {
        let coins: CoinSet = serde_json::from_str("[5, 2, 2, 0, -1, 10]").unwrap();
        let values: Vec<i64> = coins.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![2, 5, 10]);
    }

    #[test]
    fn test_pence_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Pence::new(80)).unwrap(), "80");
        let parsed: Pence = serde_json::from_str("80").unwrap();
        assert_eq!(parsed, Pence::new(80));
    }
}
