//! # Product Tray
//!
//! A bounded FIFO of product units behind one selection code. Units are
//! opaque SKU strings; the oldest-stocked unit is always delivered first,
//! the way gravity feeds the front of a physical spiral.

use std::collections::{BTreeMap, VecDeque};

use crate::error::VendError;
use crate::money::Pence;

/// One tray of the vending grid.
#[derive(Debug, Clone)]
pub struct ProductTray {
    code: String,
    price: Pence,
    capacity: usize,
    slots: VecDeque<String>,
}

impl ProductTray {
    /// Creates an empty tray.
    pub fn new(code: impl Into<String>, price: Pence, capacity: usize) -> Self {
        ProductTray {
            code: code.into(),
            price,
            capacity,
            slots: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends units to the back of the tray, oldest stock stays in front.
    ///
    /// Stops with [`VendError::TrayFull`] as soon as capacity would be
    /// exceeded; units stocked before that point are kept. Stocking is an
    /// operator action, not a transaction, so partial fill is acceptable.
    ///
    /// Returns a snapshot of the tray contents on success.
    pub fn stock(&mut self, units: Vec<String>) -> Result<Vec<String>, VendError> {
        for unit in units {
            if self.slots.len() >= self.capacity {
                return Err(VendError::TrayFull {
                    code: self.code.clone(),
                    capacity: self.capacity,
                });
            }
            self.slots.push_back(unit);
        }
        Ok(self.slots.iter().cloned().collect())
    }

    /// Removes and returns the oldest-stocked unit.
    pub fn deliver(&mut self) -> Result<String, VendError> {
        self.slots
            .pop_front()
            .ok_or_else(|| VendError::SoldOut(self.code.clone()))
    }

    /// Empties the tray, returning its contents in FIFO order.
    pub fn clear(&mut self) -> Vec<String> {
        self.slots.drain(..).collect()
    }

    /// Unit frequency by product name.
    pub fn unit_counts(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for unit in &self.slots {
            *counts.entry(unit.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn price(&self) -> Pence {
        self.price
    }

    pub fn set_price(&mut self, price: Pence) {
        self.price = price;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn units(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_new_tray_is_empty() {
        let tray = ProductTray::new("A1", Pence::new(80), 8);
        assert!(tray.is_empty());
        assert!(!tray.is_full());
        assert_eq!(tray.len(), 0);
        assert_eq!(tray.capacity(), 8);
        assert_eq!(tray.code(), "A1");
    }

    #[test]
    fn test_stock_returns_snapshot() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        let contents = tray.stock(units(&["Cheetos", "Cheetos"])).unwrap();

        assert_eq!(contents, units(&["Cheetos", "Cheetos"]));
        assert_eq!(tray.len(), 2);
    }

    #[test]
    fn test_deliver_is_fifo() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        tray.stock(units(&["first", "second"])).unwrap();

        assert_eq!(tray.deliver().unwrap(), "first");
        assert_eq!(tray.deliver().unwrap(), "second");
    }

    #[test]
    fn test_deliver_from_empty_tray_is_sold_out() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        let err = tray.deliver().unwrap_err();
        assert_eq!(err.to_string(), "Product sold out: A1");
    }

    #[test]
    fn test_stock_beyond_capacity_keeps_partial_fill() {
        let mut tray = ProductTray::new("B2", Pence::new(120), 2);

        let err = tray.stock(units(&["one", "two", "three"])).unwrap_err();
        assert_eq!(err.to_string(), "Tray B2 is full (capacity 2)");

        // The first two units went in before the failure
        assert_eq!(tray.len(), 2);
        assert!(tray.is_full());
        assert_eq!(tray.deliver().unwrap(), "one");
    }

    #[test]
    fn test_unit_counts() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        tray.stock(units(&["Cheetos", "Doritos", "Cheetos"])).unwrap();

        let counts = tray.unit_counts();
        assert_eq!(counts.get("Cheetos"), Some(&2));
        assert_eq!(counts.get("Doritos"), Some(&1));
    }

    #[test]
    fn test_clear_empties_in_fifo_order() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        tray.stock(units(&["one", "two"])).unwrap();

        assert_eq!(tray.clear(), units(&["one", "two"]));
        assert!(tray.is_empty());
    }

    #[test]
    fn test_set_price() {
        let mut tray = ProductTray::new("A1", Pence::new(80), 8);
        tray.set_price(Pence::new(95));
        assert_eq!(tray.price(), Pence::new(95));
    }

    #[test]
    fn test_zero_capacity_tray_rejects_all_stock() {
        let mut tray = ProductTray::new("C3", Pence::new(160), 0);
        assert!(tray.stock(units(&["anything"])).is_err());
        assert!(tray.is_full());
    }
}
