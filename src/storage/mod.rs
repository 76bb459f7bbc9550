//! # Storage Layer
//!
//! Everything Stockroom keeps on disk. Inventory state itself is never
//! persisted; only the command history and configuration touch files.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Command history | Plain text, one command per line | `log.txt` (configurable) |
//! | Config | TOML | `stockroom.toml`, `~/.config/stockroom/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`AuditLog`] appends from background threads, serialized by a shared
//!   mutex plus an exclusive file lock (`fs2`)

mod audit;
mod config;

pub use audit::{AuditLog, CommandHistory};
pub use config::{AuditConfig, Config, ConfigError, OutputFormat, LOCAL_CONFIG_FILE};
