//! Warehouse domain model
//!
//! A warehouse holds a shelf of SKU quantities under a capacity limit.
//! Requests that cannot be honoured in full are clamped, applied, and
//! reported back as an [`Adjustment`] so the caller can warn about it.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::inventory::InventoryError;

/// Warehouse identifier
pub type WarehouseId = u64;

/// Storage limit of a warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capacity {
    Limited(u64),
    #[default]
    Unbounded,
}

impl Capacity {
    /// Builds a capacity from an optional limit (absent means unbounded)
    pub fn from_limit(limit: Option<u64>) -> Self {
        limit.map_or(Capacity::Unbounded, Capacity::Limited)
    }

    /// Units that can still be added on top of `total`
    pub fn room(&self, total: u64) -> u64 {
        match self {
            Capacity::Limited(limit) => limit.saturating_sub(total),
            Capacity::Unbounded => u64::MAX - total,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Limited(limit) => write!(f, "{}", limit),
            Capacity::Unbounded => write!(f, "inf"),
        }
    }
}

impl Serialize for Capacity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Capacity::Limited(limit) => serializer.serialize_u64(*limit),
            Capacity::Unbounded => serializer.serialize_str("inf"),
        }
    }
}

/// Outcome of a stock or unstock request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// Quantity the operator asked for
    pub requested: u64,
    /// Quantity actually moved
    pub applied: u64,
    /// True when the request went through the clamping branch
    pub clamped: bool,
}

impl Adjustment {
    fn exact(qty: u64) -> Self {
        Self {
            requested: qty,
            applied: qty,
            clamped: false,
        }
    }

    fn clamped(requested: u64, applied: u64) -> Self {
        Self {
            requested,
            applied,
            clamped: true,
        }
    }
}

/// A capacity-limited warehouse
#[derive(Debug, Clone, Serialize)]
pub struct Warehouse {
    id: WarehouseId,
    limit: Capacity,
    total_quantity: u64,
    #[serde(skip)]
    shelf: IndexMap<String, u64>,
}

impl Warehouse {
    pub fn new(id: WarehouseId, limit: Capacity) -> Self {
        Self {
            id,
            limit,
            total_quantity: 0,
            shelf: IndexMap::new(),
        }
    }

    pub fn id(&self) -> WarehouseId {
        self.id
    }

    pub fn limit(&self) -> Capacity {
        self.limit
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity == 0
    }

    /// Quantity of a SKU on the shelf (0 when absent)
    pub fn quantity_of(&self, sku: &str) -> u64 {
        self.shelf.get(sku).copied().unwrap_or(0)
    }

    /// Shelf entries in the order they were first stocked
    pub fn shelf(&self) -> impl Iterator<Item = (&str, u64)> {
        self.shelf.iter().map(|(sku, qty)| (sku.as_str(), *qty))
    }

    /// One-line summary, e.g. `Warehouse #1 ( 5 / 10 )`
    pub fn summary(&self) -> String {
        format!(
            "Warehouse #{} ( {} / {} )",
            self.id, self.total_quantity, self.limit
        )
    }

    /// Stocks `qty` units of `sku`, clamping to the remaining capacity.
    ///
    /// The clamp triggers once the new total would reach the limit, so an
    /// exact fit is still reported as clamped. `qty` must be positive.
    pub fn stock(&mut self, sku: &str, qty: u64) -> Adjustment {
        let room = self.limit.room(self.total_quantity);
        let reaches_limit = match self.limit {
            Capacity::Limited(_) => qty >= room,
            Capacity::Unbounded => qty > room,
        };

        let adjustment = if reaches_limit {
            Adjustment::clamped(qty, room)
        } else {
            Adjustment::exact(qty)
        };

        if adjustment.applied > 0 {
            *self.shelf.entry(sku.to_string()).or_insert(0) += adjustment.applied;
            self.total_quantity += adjustment.applied;
        }

        adjustment
    }

    /// Removes `qty` units of `sku`, clamping to what is on the shelf.
    ///
    /// Entries that drop to zero are removed from the shelf. `qty` must be
    /// positive.
    pub fn unstock(&mut self, sku: &str, qty: u64) -> Result<Adjustment, InventoryError> {
        let on_shelf = self
            .shelf
            .get_mut(sku)
            .ok_or_else(|| InventoryError::NotInStock {
                sku: sku.to_string(),
                warehouse: self.id,
            })?;

        let adjustment = if qty > *on_shelf {
            Adjustment::clamped(qty, *on_shelf)
        } else {
            Adjustment::exact(qty)
        };

        *on_shelf -= adjustment.applied;
        if *on_shelf == 0 {
            self.shelf.shift_remove(sku);
        }
        self.total_quantity -= adjustment.applied;

        Ok(adjustment)
    }
}
