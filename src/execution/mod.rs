//! Execution layer - statements, meta commands, and the executor.
//!
//! # Components
//! - [`Statement`] - Parsed `insert` / `select`
//! - [`MetaCommand`] - Dot-prefixed REPL commands
//! - [`execute`] - Runs a statement against a [`Table`](crate::Table)
//! - [`Rows`] - One-shot scan over every row

pub mod executor;
pub mod meta;
mod statement;

pub use executor::{execute, execute_insert, execute_select, ExecuteOutcome, Rows};
pub use meta::MetaCommand;
pub use statement::Statement;
