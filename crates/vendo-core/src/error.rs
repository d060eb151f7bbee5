//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Error Types                             │
//! │                                                                │
//! │  CoinError   - coin bank failures (deposit, change-making)     │
//! │  VendError   - vending protocol failures (selection, stocking) │
//! │                                                                │
//! │  Flow: CoinError ──► VendError ──► display message             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error payloads (code, shortfall, capacity)
//! 3. Errors are enum variants, never String
//! 4. Each variant's `Display` IS the machine's display message, so the
//!    wording here is part of the observable behavior

use thiserror::Error;

use crate::money::Pence;

// =============================================================================
// Coin Error
// =============================================================================

/// Coin bank failures.
#[derive(Debug, Error)]
pub enum CoinError {
    /// The coin is not one of the accepted denominations.
    ///
    /// The rejected coin is never retained; the bank is unchanged.
    #[error("Invalid coin: {0}")]
    InvalidCoin(Pence),

    /// The bank cannot compose the requested amount from its inventory.
    ///
    /// `remaining` is the part of the amount that could not be covered
    /// after the greedy pass. Every coin tentatively released during the
    /// attempt has already been restored when this error is returned.
    ///
    /// The message prints the bare number (no `p` suffix): the machine
    /// display reads `Insufficient change: 1`.
    #[error("Insufficient change: {}", .remaining.value())]
    InsufficientChange { remaining: Pence },
}

// =============================================================================
// Vend Error
// =============================================================================

/// Vending protocol failures.
///
/// Consumer-facing variants are converted to display messages at the
/// machine boundary; operator-facing variants (`TrayFull`, `InvalidCode`
/// from stocking calls) propagate as plain `Result` errors.
#[derive(Debug, Error)]
pub enum VendError {
    /// No tray exists for the selection code.
    #[error("Invalid product code: {0}")]
    InvalidCode(String),

    /// The deposited amount does not cover the tray price.
    ///
    /// ## User Workflow
    /// ```text
    /// insert_coin(50p)            price: 100p
    ///      │
    ///      ▼
    /// select_product("A1")
    ///      │
    ///      ▼
    /// PaymentRequired { shortfall: 50p }
    ///      │
    ///      ▼
    /// Display shows: "Please deposit 50p"
    /// ```
    #[error("Please deposit {shortfall}")]
    PaymentRequired { shortfall: Pence },

    /// The selected tray has no units left.
    #[error("Product sold out: {0}")]
    SoldOut(String),

    /// Stocking would exceed the tray's capacity.
    #[error("Tray {code} is full (capacity {capacity})")]
    TrayFull { code: String, capacity: usize },

    /// Coin bank failure surfacing through the vending protocol.
    ///
    /// Transparent so the bank's wording reaches the display unchanged.
    #[error(transparent)]
    Coin(#[from] CoinError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VendError.
pub type VendResult<T> = Result<T, VendError>;

// =============================================================================
// Unit Tests
// =============================================================================
