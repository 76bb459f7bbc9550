//! Command grammar
//!
//! Lines are split with shell quoting rules, then matched against a fixed
//! set of patterns. Keywords are case-sensitive and token counts must match
//! exactly; there is no partial-match fallback.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{Capacity, WarehouseId};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("parsing command: {0}")]
    Tokenize(#[from] shell_words::ParseError),

    #[error("Enter valid commands")]
    Syntax,
}

/// A fully parsed operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddProduct { name: String, sku: String },
    AddWarehouse { id: WarehouseId, limit: Capacity },
    Stock { sku: String, warehouse: WarehouseId, qty: u64 },
    Unstock { sku: String, warehouse: WarehouseId, qty: u64 },
    ListProducts,
    ListWarehouses,
    ListWarehouse { id: WarehouseId },
}

/// Splits a raw line into words, honouring single and double quotes
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    Ok(shell_words::split(line)?)
}

impl Command {
    /// Matches already tokenized words against the grammar
    pub fn parse(tokens: &[String]) -> Result<Self, CommandError> {
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

        let command = match words.as_slice() {
            ["ADD", "PRODUCT", name, sku] => Command::AddProduct {
                name: name.to_string(),
                sku: sku.to_string(),
            },
            ["ADD", "WAREHOUSE", id] => Command::AddWarehouse {
                id: numeric(id)?,
                limit: Capacity::Unbounded,
            },
            ["ADD", "WAREHOUSE", id, limit] => Command::AddWarehouse {
                id: numeric(id)?,
                limit: Capacity::Limited(numeric(limit)?),
            },
            ["STOCK", sku, warehouse, qty] => Command::Stock {
                sku: sku.to_string(),
                warehouse: numeric(warehouse)?,
                qty: numeric(qty)?,
            },
            ["UNSTOCK", sku, warehouse, qty] => Command::Unstock {
                sku: sku.to_string(),
                warehouse: numeric(warehouse)?,
                qty: numeric(qty)?,
            },
            ["LIST", "PRODUCTS"] => Command::ListProducts,
            ["LIST", "WAREHOUSES"] => Command::ListWarehouses,
            ["LIST", "WAREHOUSE", id] => Command::ListWarehouse { id: numeric(id)? },
            _ => return Err(CommandError::Syntax),
        };

        Ok(command)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Command::parse(&tokenize(line)?)
    }
}

/// Accepts plain ASCII digits only: no sign, no decimal point
fn numeric(token: &str) -> Result<u64, CommandError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::Syntax);
    }
    token.parse().map_err(|_| CommandError::Syntax)
}
