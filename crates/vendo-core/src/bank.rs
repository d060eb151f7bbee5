//! # Coin Bank
//!
//! Denomination-indexed coin inventory with atomic change-making.
//!
//! ## Responsibilities
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         CoinBank                               │
//! │                                                                │
//! │  deposit(coin) ────────► bins[coin] += 1   (valid coins only)  │
//! │                                                                │
//! │  make_change(amount) ──► greedy largest-first release          │
//! │                          all-or-nothing: failure restores      │
//! │                          every tentatively released coin       │
//! │                                                                │
//! │  load(rolls) ──────────► operator restock, snapshot back       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bank never goes negative: a bin is only decremented by coins that
//! were actually in it, and a failed change attempt puts everything back.

use std::collections::BTreeMap;

use crate::error::CoinError;
use crate::money::{CoinSet, Pence};

/// A coin inventory over a fixed set of denominations.
///
/// One bin per accepted denomination, created zeroed. Coins enter through
/// [`deposit`](CoinBank::deposit) and [`load`](CoinBank::load), and leave
/// only through [`make_change`](CoinBank::make_change).
#[derive(Debug, Clone)]
pub struct CoinBank {
    /// Accepted denominations, fixed at construction.
    coins: CoinSet,

    /// Coin count per denomination. Keys are exactly the denominations in
    /// `coins`; counts are non-negative by construction.
    bins: BTreeMap<Pence, u32>,
}

impl CoinBank {
    /// Creates an empty bank over the given denomination set.
    pub fn new(coins: CoinSet) -> Self {
        let bins = coins.iter().map(|denom| (denom, 0)).collect();
        CoinBank { coins, bins }
    }

    /// Creates a bank pre-loaded from a coin list.
    ///
    /// Values outside the denomination set are discarded, so a float
    /// counted by hand can be poured in without pre-sorting it.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::bank::CoinBank;
    /// use vendo_core::money::{CoinSet, Pence};
    ///
    /// let float = [Pence::new(50), Pence::new(50), Pence::new(3)];
    /// let bank = CoinBank::with_coins(CoinSet::sterling(), &float);
    ///
    /// // The 3p slug was discarded
    /// assert_eq!(bank.total_value(), Pence::new(100));
    /// ```
    pub fn with_coins(coins: CoinSet, initial: &[Pence]) -> Self {
        let mut bank = CoinBank::new(coins);
        for &coin in initial {
            let _ = bank.deposit(coin);
        }
        bank
    }

    /// Accepts a single coin into the bank.
    ///
    /// Returns the coin's value on success, so callers can accumulate a
    /// running deposit total from the same expression. Rejects coins
    /// outside the denomination set without touching any bin.
    pub fn deposit(&mut self, coin: Pence) -> Result<Pence, CoinError> {
        match self.bins.get_mut(&coin) {
            Some(count) => {
                *count += 1;
                Ok(coin)
            }
            None => Err(CoinError::InvalidCoin(coin)),
        }
    }

    /// Composes `amount` from the inventory, largest denominations first.
    ///
    /// ## Algorithm
    /// ```text
    /// For each denomination, largest ──► smallest:
    ///     take = min(remaining / denom, bin count)
    ///     release `take` coins, subtract from remaining
    /// Stop when remaining reaches zero.
    /// ```
    ///
    /// ## Worked Example
    /// ```text
    /// bins: {1p: 10, 2p: 5, 5p: 2, 10p: 2}     make_change(35p)
    ///
    ///   10p: take 2 ──► released [10, 10]          remaining 15
    ///    5p: take 2 ──► released [.., 5, 5]        remaining  5
    ///    2p: take 2 ──► released [.., 2, 2]        remaining  1
    ///    1p: take 1 ──► released [.., 1]           remaining  0  ✓
    /// ```
    ///
    /// ## Atomicity
    /// Either the inventory decreases by exactly the returned coins, or it
    /// is unchanged: on failure every tentatively released coin is put
    /// back before the error is returned, with `remaining` reporting the
    /// uncoverable part.
    ///
    /// Greedy release is a known simplification. It is not minimal-coin-count
    /// optimal for arbitrary denomination sets, and against a sparse float it
    /// can miss a composition a full search would find: 60p from
    /// {50p: 1, 20p: 3} takes the 50p and strands itself. The failure path is
    /// safe regardless, restoring the bins and reporting the shortfall.
    pub fn make_change(&mut self, amount: Pence) -> Result<Vec<Pence>, CoinError> {
        let mut remaining = amount;
        let mut released: Vec<Pence> = Vec::new();

        for denom in self.coins.iter_descending() {
            if remaining.is_zero() {
                break;
            }

            let count = match self.bins.get_mut(&denom) {
                Some(count) if *count > 0 => count,
                _ => continue,
            };

            let take = (remaining.value() / denom.value()).min(*count as i64);
            if take <= 0 {
                continue;
            }

            *count -= take as u32;
            remaining -= denom * take;
            released.extend(std::iter::repeat(denom).take(take as usize));
        }

        if remaining.is_zero() {
            Ok(released)
        } else {
            // Restore every coin released during this attempt.
            for &coin in &released {
                if let Some(count) = self.bins.get_mut(&coin) {
                    *count += 1;
                }
            }
            Err(CoinError::InsufficientChange { remaining })
        }
    }

    /// Adds rolls of coins to the inventory (operator restocking).
    ///
    /// Denominations outside the accepted set are discarded rather than
    /// rejected; restocking is trusted operator input. Returns a snapshot
    /// of the full inventory after loading.
    pub fn load(&mut self, rolls: &BTreeMap<Pence, u32>) -> BTreeMap<Pence, u32> {
        for (&denom, &count) in rolls {
            if let Some(bin) = self.bins.get_mut(&denom) {
                *bin += count;
            }
        }
        self.bins.clone()
    }

    /// Coin count for one denomination; `None` for a value outside the set.
    pub fn count(&self, denomination: Pence) -> Option<u32> {
        self.bins.get(&denomination).copied()
    }

    /// The full inventory, keyed by denomination in ascending order.
    pub fn inventory(&self) -> &BTreeMap<Pence, u32> {
        &self.bins
    }

    /// Total monetary value held across all bins.
    pub fn total_value(&self) -> Pence {
        self.bins
            .iter()
            .map(|(&denom, &count)| denom * count)
            .sum()
    }

    /// The denominations this bank accepts.
    pub fn denominations(&self) -> &CoinSet {
        &self.coins
    }

    /// Groups a loose coin list into a frequency map.
    ///
    /// Pure helper with no validation: values outside any denomination set
    /// are grouped like any other, which makes it suitable for turning a
    /// released change list back into rolls for [`load`](CoinBank::load).
    pub fn roll(coins: &[Pence]) -> BTreeMap<Pence, u32> {
        let mut rolls = BTreeMap::new();
        for &coin in coins {
            *rolls.entry(coin).or_insert(0) += 1;
        }
        rolls
    }
}

/// Default bank is empty over the sterling set.
impl Default for CoinBank {
    fn default() -> Self {
        CoinBank::new(CoinSet::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(value: i64) -> Pence {
        Pence::new(value)
    }

    fn values(change: &[Pence]) -> Vec<i64> {
        change.iter().map(|c| c.value()).collect()
    }

    /// Bank loaded with {1p: 10, 2p: 5, 5p: 2, 10p: 2} = 50p total.
    fn small_bank() -> CoinBank {
        let mut bank = CoinBank::default();
        bank.load(&BTreeMap::from([
            (p(1), 10),
            (p(2), 5),
            (p(5), 2),
            (p(10), 2),
        ]));
        bank
    }

    #[test]
    fn test_new_bank_is_empty() {
        let bank = CoinBank::default();
        assert_eq!(bank.total_value(), Pence::zero());
        assert_eq!(bank.count(p(50)), Some(0));
        assert_eq!(bank.inventory().len(), 8);
    }

    #[test]
    fn test_deposit_valid_coin() {
        let mut bank = CoinBank::default();

        let value = bank.deposit(p(50)).unwrap();
        assert_eq!(value, p(50));
        assert_eq!(bank.count(p(50)), Some(1));
        assert_eq!(bank.total_value(), p(50));
    }

    #[test]
    fn test_deposit_invalid_coin_leaves_bank_unchanged() {
        let mut bank = CoinBank::default();

        let err = bank.deposit(p(3)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid coin: 3p");
        assert_eq!(bank.total_value(), Pence::zero());
    }

    #[test]
    fn test_with_coins_discards_invalid() {
        let bank = CoinBank::with_coins(CoinSet::sterling(), &[p(1), p(1), p(3), p(5)]);

        assert_eq!(bank.count(p(1)), Some(2));
        assert_eq!(bank.count(p(5)), Some(1));
        assert_eq!(bank.total_value(), p(7));
    }

    #[test]
    fn test_make_change_single_coin() {
        let mut bank = small_bank();
        let change = bank.make_change(p(10)).unwrap();
        assert_eq!(values(&change), vec![10]);
        assert_eq!(bank.count(p(10)), Some(1));
    }

    #[test]
    fn test_make_change_two_coins() {
        let mut bank = small_bank();
        let change = bank.make_change(p(20)).unwrap();
        assert_eq!(values(&change), vec![10, 10]);
    }

    #[test]
    fn test_make_change_descends_through_denominations() {
        let mut bank = small_bank();
        let change = bank.make_change(p(35)).unwrap();
        assert_eq!(values(&change), vec![10, 10, 5, 5, 2, 2, 1]);
    }

    #[test]
    fn test_make_change_can_drain_the_bank() {
        let mut bank = small_bank();
        let change = bank.make_change(p(50)).unwrap();

        let mut expected = vec![10, 10, 5, 5, 2, 2, 2, 2, 2];
        expected.extend(std::iter::repeat(1).take(10));
        assert_eq!(values(&change), expected);
        assert_eq!(bank.total_value(), Pence::zero());
    }

    #[test]
    fn test_make_change_updates_bins() {
        let mut bank = small_bank();
        let change = bank.make_change(p(25)).unwrap();

        assert_eq!(values(&change), vec![10, 10, 5]);
        assert_eq!(bank.count(p(10)), Some(0));
        assert_eq!(bank.count(p(5)), Some(1));
        assert_eq!(bank.count(p(2)), Some(5));
        assert_eq!(bank.count(p(1)), Some(10));
    }

    #[test]
    fn test_make_change_zero_amount() {
        let mut bank = small_bank();
        let change = bank.make_change(Pence::zero()).unwrap();
        assert!(change.is_empty());
        assert_eq!(bank.total_value(), p(50));
    }

    #[test]
    fn test_failed_change_restores_every_coin() {
        let mut bank = small_bank();

        // 51p exceeds the 50p held; the greedy pass releases everything
        // before discovering the last 1p cannot be covered.
        let err = bank.make_change(p(51)).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient change: 1");

        assert_eq!(bank.count(p(1)), Some(10));
        assert_eq!(bank.count(p(2)), Some(5));
        assert_eq!(bank.count(p(5)), Some(2));
        assert_eq!(bank.count(p(10)), Some(2));
        assert_eq!(bank.total_value(), p(50));
    }

    #[test]
    fn test_failed_change_skips_oversized_denominations() {
        let mut bank = CoinBank::with_coins(CoinSet::sterling(), &[p(100)]);

        // The £1 coin is too big to contribute toward 10p.
        let err = bank.make_change(p(10)).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient change: 10");
        assert_eq!(bank.count(p(100)), Some(1));
    }

    #[test]
    fn test_load_discards_unknown_denominations() {
        let mut bank = CoinBank::default();

        let snapshot = bank.load(&BTreeMap::from([(p(10), 4), (p(7), 99)]));

        assert_eq!(snapshot.get(&p(10)), Some(&4));
        assert!(!snapshot.contains_key(&p(7)));
        assert_eq!(bank.total_value(), p(40));
    }

    #[test]
    fn test_count_outside_set_is_none() {
        let bank = CoinBank::default();
        assert_eq!(bank.count(p(7)), None);
        assert_eq!(bank.count(p(2)), Some(0));
    }

    #[test]
    fn test_roll_groups_everything() {
        let rolls = CoinBank::roll(&[p(100), p(100), p(3)]);

        assert_eq!(rolls.get(&p(100)), Some(&2));
        // roll performs no validation; slugs are grouped too
        assert_eq!(rolls.get(&p(3)), Some(&1));
    }

    #[test]
    fn test_custom_denomination_set() {
        let coins = CoinSet::new(&[p(25), p(10), p(5)]);
        let mut bank = CoinBank::new(coins);

        bank.deposit(p(25)).unwrap();
        bank.deposit(p(10)).unwrap();
        assert!(bank.deposit(p(1)).is_err());

        let change = bank.make_change(p(35)).unwrap();
        assert_eq!(values(&change), vec![25, 10]);
    }
}
