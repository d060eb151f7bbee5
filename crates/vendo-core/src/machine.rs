//! # Vending Machine
//!
//! The transaction state machine: one coin bank, a grid of product trays,
//! and the selection protocol that keeps money and goods consistent.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      select_product("B2")                           │
//! │                                                                     │
//! │  1. Look up tray ────────── unknown? ──► "Invalid product code"     │
//! │  2. Check payment ───────── short? ────► "Please deposit Np"        │
//! │  3. Make change (overpaid)  cannot? ───► refund the whole deposit   │
//! │  4. Deliver a unit ──────── empty? ────► restore released change,   │
//! │                                          keep the deposit           │
//! │  5. Commit: deposit to 0, display cleared, unit + change returned   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1 and 2 are rejections: nothing moves, the running deposit stays
//! intact. Steps 3 and 4 are aborts: every partial mutation is rolled back
//! before the outcome is reported.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::bank::CoinBank;
use crate::config::MachineConfig;
use crate::error::VendError;
use crate::money::Pence;
use crate::tray::ProductTray;
use crate::INIT_PRICES;

// =============================================================================
// Vending Machine
// =============================================================================

/// A vending machine: coin bank, tray grid, and transaction state.
///
/// ## State Model
/// The machine state is implicit in two fields:
/// - `deposited`: zero in Idle, positive while a consumer is paying in
/// - `display`: the message from the most recent outcome, `None` in Idle
///
/// All fields are private. External collaborators interact only through
/// the methods below, so no caller can mutate the bank or a tray behind
/// the machine's back.
#[derive(Debug, Clone)]
pub struct VendingMachine {
    bank: CoinBank,
    trays: BTreeMap<String, ProductTray>,
    deposited: Pence,
    display: Option<String>,
}

impl VendingMachine {
    /// Builds a machine from configuration.
    ///
    /// Tray codes form a grid of row letters and column numbers, e.g. a
    /// 4x4 machine gets "A1" through "D4". Prices are assigned round-robin
    /// from the configured price set in grid order, so construction is
    /// deterministic and every tray price is a member of the set.
    pub fn new(config: MachineConfig) -> Self {
        let MachineConfig {
            rows,
            columns,
            tray_capacity,
            prices,
            coins,
        } = config;

        let prices = if prices.is_empty() {
            INIT_PRICES.to_vec()
        } else {
            prices
        };

        let mut trays = BTreeMap::new();
        let mut slot = 0usize;
        for row in 0..rows.min(26) {
            let letter = (b'A' + row) as char;
            for column in 1..=columns {
                let code = format!("{}{}", letter, column);
                let price = prices[slot % prices.len()];
                trays.insert(code.clone(), ProductTray::new(code, price, tray_capacity));
                slot += 1;
            }
        }

        VendingMachine {
            bank: CoinBank::new(coins),
            trays,
            deposited: Pence::zero(),
            display: None,
        }
    }

    // -------------------------------------------------------------------------
    // Consumer operations
    // -------------------------------------------------------------------------

    /// Accepts a coin toward the current transaction.
    ///
    /// Valid coins go straight into the bank and count toward the deposit.
    /// Invalid coins are bounced back without touching any state except
    /// the display message. Either way the running deposit total is
    /// returned, so the consumer always sees where they stand.
    pub fn insert_coin(&mut self, coin: Pence) -> Pence {
        match self.bank.deposit(coin) {
            Ok(value) => {
                self.deposited += value;
            }
            Err(err) => {
                self.display = Some(err.to_string());
            }
        }
        self.deposited
    }

    /// Attempts to vend the product behind `code`.
    ///
    /// Returns `(product, coins)`:
    /// - success: `(Some(unit), change)` where change sums to the
    ///   overpayment (possibly empty)
    /// - rejection (unknown code, underpayment): `(None, [])` with the
    ///   deposit retained
    /// - abort on unfeasible change: `(None, refund)` where refund is the
    ///   whole deposit paid back out
    /// - abort on sold out: `(None, [])` with the deposit retained and
    ///   any released change restored to the bank
    ///
    /// The display message always reflects the outcome of this call.
    pub fn select_product(&mut self, code: &str) -> (Option<String>, Vec<Pence>) {
        let tray = match self.trays.get_mut(code) {
            Some(tray) => tray,
            None => {
                self.display = Some(VendError::InvalidCode(code.to_string()).to_string());
                return (None, Vec::new());
            }
        };

        let price = tray.price();
        if self.deposited < price {
            let shortfall = price - self.deposited;
            self.display = Some(VendError::PaymentRequired { shortfall }.to_string());
            return (None, Vec::new());
        }

        let overpaid = self.deposited - price;
        let change = match self.bank.make_change(overpaid) {
            Ok(change) => change,
            Err(err) => {
                // The sale is off. Pay the whole deposit back out; the
                // bank was left untouched by the failed attempt.
                self.display = Some(err.to_string());
                let refund = self.refund_deposit();
                return (None, refund);
            }
        };

        match tray.deliver() {
            Ok(unit) => {
                self.deposited = Pence::zero();
                self.display = None;
                (Some(unit), change)
            }
            Err(err) => {
                // Change was already pulled from the bins; put it back
                // before reporting. The deposit stays refundable.
                self.bank.load(&CoinBank::roll(&change));
                self.display = Some(err.to_string());
                (None, Vec::new())
            }
        }
    }

    /// Cancels the current transaction, refunding the deposit.
    ///
    /// On a clean refund (or nothing deposited) the machine returns to
    /// Idle with the display cleared. If the refund itself cannot be
    /// composed, the deposit is retained as credit and the display says
    /// why; the consumer can retry after an operator loads coins.
    pub fn cancel_transaction(&mut self) -> (Option<String>, Vec<Pence>) {
        if self.deposited.is_zero() {
            self.display = None;
            return (None, Vec::new());
        }

        let refund = self.refund_deposit();
        if self.deposited.is_zero() {
            self.display = None;
        }
        (None, refund)
    }

    /// Pays the whole deposit back out of the bank.
    ///
    /// On failure the deposit is kept (the bank was not touched, so the
    /// coins backing it are still there) and the display carries the
    /// refund error.
    fn refund_deposit(&mut self) -> Vec<Pence> {
        match self.bank.make_change(self.deposited) {
            Ok(refund) => {
                self.deposited = Pence::zero();
                refund
            }
            Err(err) => {
                self.display = Some(err.to_string());
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Operator operations
    // -------------------------------------------------------------------------

    /// Stocks a tray with product units.
    ///
    /// Operator-facing: failures are hard errors, not display messages.
    pub fn stock_tray(&mut self, code: &str, units: Vec<String>) -> Result<Vec<String>, VendError> {
        match self.trays.get_mut(code) {
            Some(tray) => tray.stock(units),
            None => Err(VendError::InvalidCode(code.to_string())),
        }
    }

    /// Re-prices a tray, returning the new price.
    pub fn set_price(&mut self, code: &str, price: Pence) -> Result<Pence, VendError> {
        match self.trays.get_mut(code) {
            Some(tray) => {
                tray.set_price(price);
                Ok(price)
            }
            None => Err(VendError::InvalidCode(code.to_string())),
        }
    }

    /// Loads rolls of coins into the bank, returning the inventory after.
    pub fn load_coins(&mut self, rolls: &BTreeMap<Pence, u32>) -> BTreeMap<Pence, u32> {
        self.bank.load(rolls)
    }

    /// Aggregate unit counts across every tray.
    pub fn count_products(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for tray in self.trays.values() {
            for (unit, count) in tray.unit_counts() {
                *counts.entry(unit).or_insert(0) += count;
            }
        }
        counts
    }

    /// Snapshot of stock and coin holdings for reporting.
    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            products: self.count_products(),
            coin_inventory: self.bank.inventory().clone(),
            total_value: self.bank.total_value(),
        }
    }

    // -------------------------------------------------------------------------
    // Read-only accessors
    // -------------------------------------------------------------------------

    /// The current display message, if any.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Amount deposited toward the current transaction.
    pub fn deposited(&self) -> Pence {
        self.deposited
    }

    /// Read-only view of the coin bank.
    pub fn bank(&self) -> &CoinBank {
        &self.bank
    }

    /// Read-only view of one tray.
    pub fn tray(&self, code: &str) -> Option<&ProductTray> {
        self.trays.get(code)
    }

    /// All trays, keyed by code in grid order.
    pub fn trays(&self) -> &BTreeMap<String, ProductTray> {
        &self.trays
    }
}

/// Default machine is the classic 4x4 configuration.
impl Default for VendingMachine {
    fn default() -> Self {
        VendingMachine::new(MachineConfig::default())
    }
}

// =============================================================================
// Machine Status
// =============================================================================

/// Serializable snapshot of machine holdings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineStatus {
    /// Unit counts by product name across all trays.
    pub products: BTreeMap<String, u32>,

    /// Coin counts by denomination.
    pub coin_inventory: BTreeMap<Pence, u32>,

    /// Total monetary value held in the bank.
    pub total_value: Pence,
}

// =============================================================================
// Machine State Wrapper
// =============================================================================

/// Shared-ownership wrapper serializing access to one machine.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<VendingMachine>>` because:
/// - `Arc`: allows shared ownership across threads
/// - `Mutex`: ensures only one caller runs the protocol at a time
///
/// The physical analogy holds: one consumer stands in front of the
/// machine at a time, and a whole insert/select/cancel exchange happens
/// inside a single locked closure.
#[derive(Debug)]
pub struct MachineState {
    machine: Arc<Mutex<VendingMachine>>,
}

impl MachineState {
    /// Wraps a machine for shared access.
    pub fn new(machine: VendingMachine) -> Self {
        MachineState {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let status = state.with_machine(|machine| machine.status());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingMachine) -> R,
    {
        let machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let (product, change) = state.with_machine_mut(|m| m.select_product("A1"));
    /// ```
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingMachine) -> R,
    {
        let mut machine = self.machine.lock().expect("Machine mutex poisoned");
        f(&mut machine)
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new(VendingMachine::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
