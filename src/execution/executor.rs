//! Executor - runs statements against a table through cursors.

use crate::common::{Error, Result};
use crate::table::{Cursor, Row, Table};

use super::Statement;

/// What a successful statement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    Inserted,
    /// Every row in ascending id order.
    Rows(Vec<Row>),
}

/// Run a prepared statement.
///
/// # Errors
/// Insert failures from [`execute_insert`]; I/O or integrity errors from the
/// scan.
pub fn execute(statement: &Statement, table: &mut Table) -> Result<ExecuteOutcome> {
    match statement {
        Statement::Insert(row) => {
            execute_insert(table, row)?;
            Ok(ExecuteOutcome::Inserted)
        }
        Statement::Select => Ok(ExecuteOutcome::Rows(execute_select(table)?)),
    }
}

/// Insert `row` keyed by its id, keeping the leaf sorted.
///
/// # Errors
/// - `Error::TableFull` if the root leaf is at capacity
/// - `Error::DuplicateKey` if a row with the same id exists
///
/// Neither case modifies the table.
pub fn execute_insert(table: &mut Table, row: &Row) -> Result<()> {
    let key = row.id();
    let root = table.root_page();
    let leaf = table.leaf(root)?;

    if leaf.is_full() {
        tracing::warn!(key, cells = leaf.num_cells(), "insert rejected: table full");
        return Err(Error::TableFull);
    }

    let cell = match leaf.find(key) {
        Ok(_) => {
            tracing::warn!(key, "insert rejected: duplicate key");
            return Err(Error::DuplicateKey(key));
        }
        Err(cell) => cell,
    };

    Cursor::at_cell(table, cell)?.insert(key, row)?;

    tracing::debug!(key, cell, "inserted row");
    Ok(())
}

/// Scan the whole table into a `Vec`.
pub fn execute_select(table: &mut Table) -> Result<Vec<Row>> {
    Rows::new(table)?.collect()
}

/// One-shot iterator over every row in key order.
///
/// Each call to [`Rows::new`] starts a fresh cursor at the first cell. An
/// error ends the iteration after it is yielded.
///
/// # Example
/// ```no_run
/// use rowstore::execution::Rows;
/// use rowstore::Table;
///
/// let mut table = Table::open("test.db")?;
/// for row in Rows::new(&mut table)? {
///     println!("{}", row?);
/// }
/// # Ok::<(), rowstore::Error>(())
/// ```
pub struct Rows<'a> {
    cursor: Cursor<'a>,
    failed: bool,
}

impl<'a> Rows<'a> {
    pub fn new(table: &'a mut Table) -> Result<Self> {
        Ok(Self {
            cursor: Cursor::table_start(table)?,
            failed: false,
        })
    }

    fn next_row(&mut self) -> Result<Row> {
        let row = Row::deserialize(self.cursor.value()?);
        self.cursor.advance()?;
        Ok(row)
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.end_of_table() {
            return None;
        }

        let row = self.next_row();
        self.failed = row.is_err();
        Some(row)
    }
}
