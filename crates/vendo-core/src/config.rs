//! # Machine Configuration
//!
//! Initialization parameters for a vending machine.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Whatever the embedding shell provides (env vars, flags, files)
//! 2. Defaults (this file)
//!
//! The core itself never reads the environment; shells map their inputs
//! onto this struct and hand it to [`VendingMachine::new`].
//!
//! [`VendingMachine::new`]: crate::machine::VendingMachine::new

use serde::{Deserialize, Serialize};

use crate::money::{CoinSet, Pence};
use crate::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_TRAY_CAPACITY, INIT_PRICES};

/// Vending machine initialization parameters.
///
/// ## Fields
/// All fields have defaults matching the classic 4x4 machine; embedders
/// override only what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Grid rows, lettered "A" upward (max 26).
    pub rows: u8,

    /// Grid columns, numbered "1" upward.
    pub columns: u8,

    /// Unit capacity of each tray.
    pub tray_capacity: usize,

    /// Price set assigned round-robin across trays in grid order.
    /// An empty list falls back to [`INIT_PRICES`].
    pub prices: Vec<Pence>,

    /// Accepted coin denominations.
    pub coins: CoinSet,
}

impl Default for MachineConfig {
    /// Returns the classic machine: 4x4 grid, 8 units per tray,
    /// prices {80p, 120p, 160p}, sterling coins.
    fn default() -> Self {
        MachineConfig {
            rows: DEFAULT_GRID_ROWS,
            columns: DEFAULT_GRID_COLUMNS,
            tray_capacity: DEFAULT_TRAY_CAPACITY,
            prices: INIT_PRICES.to_vec(),
            coins: CoinSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MachineConfig::default();
        assert_eq!(config.rows, 4);
        assert_eq!(config.columns, 4);
        assert_eq!(config.tray_capacity, 8);
        assert_eq!(config.prices.len(), 3);
        assert_eq!(config.coins.len(), 8);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = MachineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MachineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.rows, config.rows);
        assert_eq!(parsed.prices, config.prices);
        assert_eq!(parsed.coins, config.coins);
    }
}
