//! Table layer - rows, the table, and cursors over it.
//!
//! - [`Row`] - The fixed-schema record and its packed codec
//! - [`Table`] - Owns the pager and the root leaf
//! - [`Cursor`] - A position used to read and insert cells

mod cursor;
mod row;
#[allow(clippy::module_inception)]
mod table;

pub use cursor::Cursor;
pub use row::Row;
pub use table::Table;
