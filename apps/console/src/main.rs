//! # Vendo Console Demo
//!
//! Drives a vending machine through a scripted consumer session.
//!
//! ## Usage
//! ```bash
//! # Default 4x4 machine
//! cargo run -p vendo-console
//!
//! # Custom grid geometry
//! cargo run -p vendo-console -- --rows 2 --columns 3 --capacity 5
//! ```
//!
//! ## Environment Variables
//! - `VENDO_ROWS`, `VENDO_COLUMNS`, `VENDO_TRAY_CAPACITY`: grid overrides
//!   (command-line flags win over these)
//! - `RUST_LOG`: tracing filter, default `info,vendo_console=debug`
//!
//! ## Session Script
//! The demo walks the interesting paths in order: a purchase that fails
//! for lack of change, an operator float load, a successful purchase with
//! change, an operator re-price, underpayment topped up, a rejected slug,
//! a sold-out selection, and a cancellation. The final machine status
//! prints as JSON.

use std::collections::BTreeMap;
use std::env;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vendo_core::{MachineConfig, MachineState, Pence, VendingMachine};

/// Trays stocked for the demo: (code, product, units).
const SNACKS: &[(&str, &str, usize)] = &[
    ("A1", "Cheetos", 3),
    ("A2", "Doritos", 3),
    ("A3", "Pretzels", 2),
    ("B1", "Snickers", 3),
    ("B2", "Wine Gums", 2),
];

/// Operator float loaded partway through the session.
const FLOAT: &[(i64, u32)] = &[(1, 40), (2, 10), (5, 4), (10, 2)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut config = config_from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" | "-r" => {
                if i + 1 < args.len() {
                    config.rows = args[i + 1].parse().unwrap_or(config.rows);
                    i += 1;
                }
            }
            "--columns" | "-c" => {
                if i + 1 < args.len() {
                    config.columns = args[i + 1].parse().unwrap_or(config.columns);
                    i += 1;
                }
            }
            "--capacity" => {
                if i + 1 < args.len() {
                    config.tray_capacity = args[i + 1].parse().unwrap_or(config.tray_capacity);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vendo Console Demo");
                println!();
                println!("Usage: vendo-console [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -r, --rows <N>       Grid rows (default: 4)");
                println!("  -c, --columns <N>    Grid columns (default: 4)");
                println!("      --capacity <N>   Units per tray (default: 8)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(
        rows = config.rows,
        columns = config.columns,
        capacity = config.tray_capacity,
        "machine configured"
    );

    println!("🥫 Vendo Console Demo");
    println!("=====================");
    println!("Grid: {}x{}, tray capacity {}", config.rows, config.columns, config.tray_capacity);

    let state = MachineState::new(VendingMachine::new(config));

    let accepted = state.with_machine(|machine| {
        machine
            .bank()
            .denominations()
            .values()
            .iter()
            .map(|coin| coin.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    });
    println!("Accepted coins: {}", accepted);

    println!();
    println!("Stocking trays...");
    for &(code, name, count) in SNACKS {
        let price = state.with_machine(|machine| machine.tray(code).map(|tray| tray.price()));
        let units = vec![name.to_string(); count];
        match state.with_machine_mut(|machine| machine.stock_tray(code, units)) {
            Ok(contents) => {
                let price = price.unwrap_or_default();
                println!("  ✓ {}: {} x {} @ {}", code, contents.len(), name, price);
            }
            Err(err) => warn!(code, %err, "tray not stocked"),
        }
    }

    println!();
    println!("Session 1: buying before the float is loaded");
    insert_coin(&state, Pence::new(100));
    select(&state, "A2"); // 120p: still short
    insert_coin(&state, Pence::new(50));
    select(&state, "A2"); // 30p change cannot be composed: full refund

    println!();
    println!("Loading coin float...");
    let rolls: BTreeMap<Pence, u32> = FLOAT
        .iter()
        .map(|&(denom, count)| (Pence::new(denom), count))
        .collect();
    let inventory = state.with_machine_mut(|machine| machine.load_coins(&rolls));
    debug!(?inventory, "float loaded");
    let total = state.with_machine(|machine| machine.bank().total_value());
    println!("  ✓ bank now holds {}", total);

    println!();
    println!("Session 2: the same purchase succeeds");
    insert_coin(&state, Pence::new(100));
    insert_coin(&state, Pence::new(50));
    select(&state, "A2");

    println!();
    println!("Session 3: operator re-price");
    let new_price = state.with_machine_mut(|machine| machine.set_price("B2", Pence::new(90)))?;
    println!("  ✓ B2 re-priced to {}", new_price);
    insert_coin(&state, Pence::new(100));
    select(&state, "B2");

    println!();
    println!("Session 4: odds and ends");
    select(&state, "Z9"); // no such tray
    insert_coin(&state, Pence::new(3)); // slug
    cancel(&state);

    println!();
    println!("Session 5: selling out a tray");
    for _ in 0..3 {
        insert_coin(&state, Pence::new(50));
        insert_coin(&state, Pence::new(20));
        insert_coin(&state, Pence::new(10));
        select(&state, "A1"); // 80p exact
    }
    insert_coin(&state, Pence::new(100));
    select(&state, "A1"); // sold out: deposit survives
    cancel(&state);

    println!();
    println!("Final status");
    println!("============");
    let status = state.with_machine(|machine| machine.status());
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages everywhere
/// - `RUST_LOG=vendo_core=trace` - trace for the core crate only
/// - Default: INFO, with DEBUG for this binary
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vendo_console=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the machine configuration from defaults plus `VENDO_*` overrides.
fn config_from_env() -> MachineConfig {
    let mut config = MachineConfig::default();

    if let Ok(rows) = env::var("VENDO_ROWS") {
        if let Ok(rows) = rows.parse() {
            config.rows = rows;
        }
    }

    if let Ok(columns) = env::var("VENDO_COLUMNS") {
        if let Ok(columns) = columns.parse() {
            config.columns = columns;
        }
    }

    if let Ok(capacity) = env::var("VENDO_TRAY_CAPACITY") {
        if let Ok(capacity) = capacity.parse() {
            config.tray_capacity = capacity;
        }
    }

    config
}

/// Inserts one coin and reports the running deposit.
fn insert_coin(state: &MachineState, coin: Pence) {
    let deposited = state.with_machine_mut(|machine| machine.insert_coin(coin));
    let accepted = state.with_machine(|machine| machine.bank().denominations().contains(coin));
    if accepted {
        println!("  insert {:>5} -> deposited {}", coin.to_string(), deposited);
    } else {
        let message = state.with_machine(|machine| machine.display().map(String::from));
        println!(
            "  insert {:>5} -> ⚠ {} (deposited still {})",
            coin.to_string(),
            message.unwrap_or_default(),
            deposited
        );
    }
}

/// Makes a selection and reports what came out of the machine.
fn select(state: &MachineState, code: &str) {
    let (product, coins) = state.with_machine_mut(|machine| machine.select_product(code));
    match product {
        Some(unit) => {
            info!(code, %unit, "dispensed");
            println!("  select {} -> ✓ {} dispensed, change {}", code, unit, format_coins(&coins));
        }
        None => {
            let message = state.with_machine(|machine| machine.display().map(String::from));
            println!(
                "  select {} -> ⚠ {} (coins returned: {})",
                code,
                message.unwrap_or_default(),
                format_coins(&coins)
            );
        }
    }
}

/// Cancels the current transaction and reports the refund.
fn cancel(state: &MachineState) {
    let (_, refund) = state.with_machine_mut(|machine| machine.cancel_transaction());
    println!("  cancel -> refund {}", format_coins(&refund));
}

/// Renders a coin list like `[100p, 50p]`, or `none` when empty.
fn format_coins(coins: &[Pence]) -> String {
    if coins.is_empty() {
        return "none".to_string();
    }
    let parts: Vec<String> = coins.iter().map(|coin| coin.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
