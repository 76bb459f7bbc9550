//! Inventory orchestrator
//!
//! Owns the product catalog and every warehouse. Cross references between
//! the two are by key only, so each operation resolves the SKU and the
//! warehouse id up front and refuses to mutate anything on the first
//! violation.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use super::catalog::ProductCatalog;
use super::warehouse::{Adjustment, Capacity, Warehouse, WarehouseId};

/// What the operator was doing when a reference failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Stock { sku: String, warehouse: WarehouseId },
    Unstock { sku: String, warehouse: WarehouseId },
    List { warehouse: WarehouseId },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Stock { sku, warehouse } => {
                write!(f, "stocking {} in the warehouse {}", sku, warehouse)
            }
            Action::Unstock { sku, warehouse } => {
                write!(f, "unstocking {} in the warehouse {}", sku, warehouse)
            }
            Action::List { warehouse } => write!(f, "listing the warehouse {}", warehouse),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("adding product {name} {sku} : existing SKU")]
    DuplicateProduct { name: String, sku: String },

    #[error("adding warehouse {0} : existing warehouse ID")]
    DuplicateWarehouse(WarehouseId),

    #[error("{0} : not existing SKU")]
    UnknownSku(Action),

    #[error("{0} : not existing warehouse ID")]
    UnknownWarehouse(Action),

    #[error("{0} : not positive quantity")]
    InvalidQuantity(Action),

    #[error("unstocking {sku} in the warehouse {warehouse} : not in stock")]
    NotInStock { sku: String, warehouse: WarehouseId },
}

/// The whole inventory: catalog plus warehouses
#[derive(Debug, Default)]
pub struct Inventory {
    catalog: ProductCatalog,
    warehouses: IndexMap<WarehouseId, Warehouse>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Warehouses in creation order
    pub fn warehouses(&self) -> impl Iterator<Item = &Warehouse> {
        self.warehouses.values()
    }

    pub fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.warehouses.get(&id)
    }

    pub fn add_product(&mut self, name: &str, sku: &str) -> Result<(), InventoryError> {
        if self.catalog.add(name, sku) {
            Ok(())
        } else {
            Err(InventoryError::DuplicateProduct {
                name: name.to_string(),
                sku: sku.to_string(),
            })
        }
    }

    pub fn add_warehouse(&mut self, id: WarehouseId, limit: Capacity) -> Result<(), InventoryError> {
        if self.warehouses.contains_key(&id) {
            return Err(InventoryError::DuplicateWarehouse(id));
        }
        self.warehouses.insert(id, Warehouse::new(id, limit));
        Ok(())
    }

    pub fn stock(
        &mut self,
        sku: &str,
        warehouse: WarehouseId,
        qty: u64,
    ) -> Result<Adjustment, InventoryError> {
        let action = Action::Stock {
            sku: sku.to_string(),
            warehouse,
        };
        let target = self.resolve(action, sku, warehouse, qty)?;
        Ok(target.stock(sku, qty))
    }

    pub fn unstock(
        &mut self,
        sku: &str,
        warehouse: WarehouseId,
        qty: u64,
    ) -> Result<Adjustment, InventoryError> {
        let action = Action::Unstock {
            sku: sku.to_string(),
            warehouse,
        };
        let target = self.resolve(action, sku, warehouse, qty)?;
        target.unstock(sku, qty)
    }

    /// Looks up a warehouse for display
    pub fn list_warehouse(&self, id: WarehouseId) -> Result<&Warehouse, InventoryError> {
        self.warehouses
            .get(&id)
            .ok_or(InventoryError::UnknownWarehouse(Action::List { warehouse: id }))
    }

    /// Validates SKU, then warehouse, then quantity, in that order
    fn resolve(
        &mut self,
        action: Action,
        sku: &str,
        warehouse: WarehouseId,
        qty: u64,
    ) -> Result<&mut Warehouse, InventoryError> {
        if !self.catalog.contains(sku) {
            return Err(InventoryError::UnknownSku(action));
        }
        let Some(target) = self.warehouses.get_mut(&warehouse) else {
            return Err(InventoryError::UnknownWarehouse(action));
        };
        if qty == 0 {
            return Err(InventoryError::InvalidQuantity(action));
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_product("Widget", "W-1").unwrap();
        inventory.add_warehouse(1, Capacity::Limited(10)).unwrap();
        inventory
    }

    #[test]
    fn duplicate_product_is_rejected() {
        let mut inventory = stocked();
        let err = inventory.add_product("Other", "W-1").unwrap_err();

        assert_eq!(
            err.to_string(),
            "adding product Other W-1 : existing SKU"
        );
        assert_eq!(inventory.catalog().len(), 1);
        assert_eq!(inventory.catalog().lookup("W-1").unwrap().name, "Widget");
    }

    #[test]
    fn duplicate_warehouse_is_rejected() {
        let mut inventory = stocked();
        let err = inventory.add_warehouse(1, Capacity::Unbounded).unwrap_err();

        assert_eq!(err, InventoryError::DuplicateWarehouse(1));
        assert_eq!(inventory.warehouse(1).unwrap().limit(), Capacity::Limited(10));
    }

    #[test]
    fn stock_unknown_warehouse_mutates_nothing() {
        let mut inventory = stocked();
        let err = inventory.stock("W-1", 2, 5).unwrap_err();

        assert!(matches!(err, InventoryError::UnknownWarehouse(_)));
        assert_eq!(
            err.to_string(),
            "stocking W-1 in the warehouse 2 : not existing warehouse ID"
        );
        assert!(inventory.warehouse(1).unwrap().is_empty());
    }

    #[test]
    fn sku_is_checked_before_warehouse_and_quantity() {
        let mut inventory = stocked();

        let err = inventory.stock("nope", 9, 0).unwrap_err();
        assert!(matches!(err, InventoryError::UnknownSku(_)));

        let err = inventory.unstock("W-1", 9, 0).unwrap_err();
        assert!(matches!(err, InventoryError::UnknownWarehouse(_)));

        let err = inventory.unstock("W-1", 1, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unstocking W-1 in the warehouse 1 : not positive quantity"
        );
    }

    #[test]
    fn stock_and_unstock_delegate() {
        let mut inventory = stocked();

        let adjustment = inventory.stock("W-1", 1, 4).unwrap();
        assert!(!adjustment.clamped);
        assert_eq!(inventory.warehouse(1).unwrap().quantity_of("W-1"), 4);

        let adjustment = inventory.unstock("W-1", 1, 6).unwrap();
        assert!(adjustment.clamped);
        assert_eq!(adjustment.applied, 4);
        assert!(inventory.warehouse(1).unwrap().is_empty());
    }

    #[test]
    fn unstock_not_in_stock() {
        let mut inventory = stocked();
        let err = inventory.unstock("W-1", 1, 1).unwrap_err();

        assert_eq!(
            err.to_string(),
            "unstocking W-1 in the warehouse 1 : not in stock"
        );
    }

    #[test]
    fn list_unknown_warehouse() {
        let inventory = stocked();

        assert_eq!(inventory.list_warehouse(1).unwrap().id(), 1);
        assert_eq!(
            inventory.list_warehouse(3).unwrap_err().to_string(),
            "listing the warehouse 3 : not existing warehouse ID"
        );
    }
}
