//! Domain models for Stockroom
//!
//! Contains the inventory state machine without any I/O concerns.

mod catalog;
mod warehouse;
mod inventory;

pub use catalog::{Product, ProductCatalog};
pub use warehouse::{Adjustment, Capacity, Warehouse, WarehouseId};
pub use inventory::{Action, Inventory, InventoryError};
