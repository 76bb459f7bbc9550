//! # Command-Line Interface
//!
//! The read-eval loop, the command grammar and everything printed to the
//! operator.
//!
//! ## Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `ADD PRODUCT <name> <sku>` | Register a product |
//! | `ADD WAREHOUSE <id> [<limit>]` | Create a warehouse (unbounded without a limit) |
//! | `STOCK <sku> <id> <qty>` | Add stock, clamped to capacity |
//! | `UNSTOCK <sku> <id> <qty>` | Remove stock, clamped to what is shelved |
//! | `LIST PRODUCTS` | Show the catalog |
//! | `LIST WAREHOUSES` | Show every warehouse |
//! | `LIST WAREHOUSE <id>` | Show one warehouse and its shelf |
//!
//! ## Modes
//!
//! - Interactive (default): prompt and read stdin until end of input
//! - Replay (`--replay <FILE>`): echo and run each line of a file
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the session.

mod app;
mod command;
mod interpreter;
mod output;
mod render;
mod table;

pub use app::{interactive, replay, run, Cli};
pub use command::{tokenize, Command, CommandError};
pub use interpreter::Interpreter;
pub use output::{Output, OutputFormat};
pub use table::Table;
