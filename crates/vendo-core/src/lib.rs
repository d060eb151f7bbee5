//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of Vendo. It contains the complete
//! transactional model of a vending machine as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      Vendo Architecture                       │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────────┐  │
//! │  │          Embedding Shell (console, kiosk, ...)          │  │
//! │  │     coin mech events ──► calls ──► printed display      │  │
//! │  └────────────────────────────┬────────────────────────────┘  │
//! │                               │                               │
//! │  ┌────────────────────────────▼────────────────────────────┐  │
//! │  │               ★ vendo-core (THIS CRATE) ★               │  │
//! │  │                                                         │  │
//! │  │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌───────────┐   │  │
//! │  │  │  money  │  │  bank   │  │  tray   │  │  machine  │   │  │
//! │  │  │  Pence  │  │CoinBank │  │ Product │  │  Vending  │   │  │
//! │  │  │ CoinSet │  │ change  │  │  Tray   │  │  Machine  │   │  │
//! │  │  └─────────┘  └─────────┘  └─────────┘  └───────────┘   │  │
//! │  │                                                         │  │
//! │  │  NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS        │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Pence` integer money and the `CoinSet` of denominations
//! - [`error`] - Domain errors whose `Display` is the machine display text
//! - [`bank`] - Coin inventory with atomic greedy change-making
//! - [`tray`] - Bounded FIFO product trays
//! - [`machine`] - The transaction state machine and status snapshot
//! - [`config`] - Initialization parameters
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, same input = same outcome
//! 2. **No I/O**: hardware, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are whole pence (i64)
//! 4. **Atomic Failure**: a failed transaction leaves every inventory
//!    exactly as it was, apart from explicitly returned refunds
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::{Pence, VendingMachine};
//!
//! let mut machine = VendingMachine::default();
//! machine.stock_tray("A1", vec!["Cola".to_string()]).unwrap();
//! machine.set_price("A1", Pence::new(100)).unwrap();
//!
//! machine.insert_coin(Pence::new(100));
//! let (product, change) = machine.select_product("A1");
//!
//! assert_eq!(product.as_deref(), Some("Cola"));
//! assert!(change.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bank;
pub mod config;
pub mod error;
pub mod machine;
pub mod money;
pub mod tray;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Pence` instead of
// `use vendo_core::money::Pence`

pub use bank::CoinBank;
pub use config::MachineConfig;
pub use error::{CoinError, VendError, VendResult};
pub use machine::{MachineState, MachineStatus, VendingMachine};
pub use money::{CoinSet, Pence, STERLING_COINS};
pub use tray::ProductTray;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of grid rows ("A" through "D").
pub const DEFAULT_GRID_ROWS: u8 = 4;

/// Default number of grid columns ("1" through "4").
pub const DEFAULT_GRID_COLUMNS: u8 = 4;

/// Default unit capacity of each tray.
///
/// ## Why 8?
/// Eight units fit a standard snack spiral. Larger cabinets override this
/// through [`MachineConfig`].
pub const DEFAULT_TRAY_CAPACITY: usize = 8;

/// Default price set assigned round-robin across trays at construction.
pub const INIT_PRICES: [Pence; 3] = [Pence::new(80), Pence::new(120), Pence::new(160)];
