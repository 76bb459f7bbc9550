//! Command interpreter
//!
//! Turns one raw line into an inventory operation and reports the outcome.
//! Domain failures are printed and the command is abandoned; only output
//! failures propagate to the caller.

use anyhow::Result;

use super::command::{tokenize, Command};
use super::output::Output;
use super::render;
use crate::domain::{Adjustment, Inventory, InventoryError};
use crate::storage::CommandHistory;

/// Interpreter state: the inventory plus where accepted lines are recorded
pub struct Interpreter<H: CommandHistory> {
    inventory: Inventory,
    history: H,
}

impl<H: CommandHistory> Interpreter<H> {
    pub fn new(history: H) -> Self {
        Self {
            inventory: Inventory::new(),
            history,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_history(self) -> H {
        self.history
    }

    /// Executes one raw command line
    pub fn execute(&mut self, line: &str, output: &mut Output) -> Result<()> {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!(line, "Tokenization failed");
                output.error(&e.to_string())?;
                return Ok(());
            }
        };

        self.history.record(line);

        match Command::parse(&tokens) {
            Ok(command) => self.dispatch(command, output),
            Err(e) => {
                tracing::debug!(line, "No grammar pattern matched");
                output.invalid(&e.to_string())?;
                Ok(())
            }
        }
    }

    fn dispatch(&mut self, command: Command, output: &mut Output) -> Result<()> {
        tracing::debug!(?command, "Dispatching");

        match command {
            Command::AddProduct { name, sku } => {
                let result = self.inventory.add_product(&name, &sku);
                report(output, result)?;
            }
            Command::AddWarehouse { id, limit } => {
                let result = self.inventory.add_warehouse(id, limit);
                report(output, result)?;
            }
            Command::Stock { sku, warehouse, qty } => {
                match self.inventory.stock(&sku, warehouse, qty) {
                    Ok(adjustment) => warn_adjusted(output, "stocking", adjustment)?,
                    Err(e) => output.error(&e.to_string())?,
                }
            }
            Command::Unstock { sku, warehouse, qty } => {
                match self.inventory.unstock(&sku, warehouse, qty) {
                    Ok(adjustment) => warn_adjusted(output, "unstocking", adjustment)?,
                    Err(e) => output.error(&e.to_string())?,
                }
            }
            Command::ListProducts => {
                let catalog = self.inventory.catalog();
                if output.is_json() {
                    output.data(&catalog.iter().collect::<Vec<_>>())?;
                } else {
                    output.text(&render::products(catalog.iter()))?;
                }
            }
            Command::ListWarehouses => {
                if output.is_json() {
                    output.data(&self.inventory.warehouses().collect::<Vec<_>>())?;
                } else {
                    output.text(&render::warehouses(self.inventory.warehouses()))?;
                }
            }
            Command::ListWarehouse { id } => match self.inventory.list_warehouse(id) {
                Ok(warehouse) => {
                    let catalog = self.inventory.catalog();
                    if output.is_json() {
                        output.data(&render::WarehouseView {
                            warehouse,
                            shelf: render::shelf_rows(warehouse, catalog),
                        })?;
                    } else {
                        output.text(&render::warehouse(warehouse, catalog))?;
                    }
                }
                Err(e) => output.error(&e.to_string())?,
            },
        }

        Ok(())
    }
}

fn report(output: &mut Output, result: Result<(), InventoryError>) -> Result<()> {
    if let Err(e) = result {
        output.error(&e.to_string())?;
    }
    Ok(())
}

fn warn_adjusted(output: &mut Output, verb: &str, adjustment: Adjustment) -> Result<()> {
    if adjustment.clamped {
        output.warning(&format!(
            "{} quantity {} adjusted to {}",
            verb, adjustment.requested, adjustment.applied
        ))?;
    }
    Ok(())
}
