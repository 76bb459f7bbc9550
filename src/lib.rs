//! Stockroom - an interactive command-line inventory tracker
//!
//! Stockroom keeps a catalog of products and a set of capacity-limited
//! warehouses, and lets an operator stock and unstock items through
//! line-oriented commands. Requests that exceed capacity or stock on hand
//! are clamped and reported as warnings rather than rejected.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Capacity, Inventory, InventoryError, Product, Warehouse};
