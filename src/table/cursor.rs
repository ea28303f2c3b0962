//! Cursor - a position within a table.

use crate::common::config::ROW_SIZE;
use crate::common::{Error, PageId, Result};
use crate::storage::page::leaf;

use super::{Row, Table};

/// A logical `(page, cell)` position in a [`Table`].
///
/// Cursors are created per operation and hold the table's `&mut` borrow, so
/// they cannot outlive the table or coexist with another cursor.
///
/// The cursor does not search. Callers that insert compute the sorted
/// position first and hand it to [`Cursor::at_cell`].
///
/// # Example
/// ```no_run
/// use rowstore::{Cursor, Row, Table};
///
/// let mut table = Table::open("test.db")?;
/// let mut cursor = Cursor::table_start(&mut table)?;
/// while !cursor.end_of_table() {
///     println!("{}", Row::deserialize(cursor.value()?));
///     cursor.advance()?;
/// }
/// # Ok::<(), rowstore::Error>(())
/// ```
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_id: PageId,
    cell_num: u32,
    /// Positioned one past the last cell.
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Position at the first cell of the root leaf.
    pub fn table_start(table: &'a mut Table) -> Result<Self> {
        Self::at_cell(table, 0)
    }

    /// Position one past the last cell of the root leaf.
    pub fn table_end(table: &'a mut Table) -> Result<Self> {
        let page_id = table.root_page();
        let num_cells = table.leaf(page_id)?.num_cells();

        Ok(Self {
            table,
            page_id,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    /// Position at `cell_num` of the root leaf.
    ///
    /// `end_of_table` is set if `cell_num` is at or past the cell count.
    pub fn at_cell(table: &'a mut Table, cell_num: u32) -> Result<Self> {
        let page_id = table.root_page();
        let num_cells = table.leaf(page_id)?.num_cells();

        Ok(Self {
            table,
            page_id,
            cell_num,
            end_of_table: cell_num >= num_cells,
        })
    }

    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    #[inline]
    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    #[inline]
    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// Packed row bytes at the current position.
    ///
    /// # Errors
    /// Returns `Error::CursorOutOfRange` if the cursor is at end of table.
    pub fn value(&mut self) -> Result<&[u8]> {
        if self.end_of_table {
            return Err(Error::CursorOutOfRange);
        }

        let page = self.table.page(self.page_id)?;
        Ok(&page.as_slice()[leaf::value_range(self.cell_num)])
    }

    /// Key at the current position.
    pub fn key(&mut self) -> Result<u32> {
        if self.end_of_table {
            return Err(Error::CursorOutOfRange);
        }

        Ok(self.table.leaf(self.page_id)?.key(self.cell_num))
    }

    /// Move to the next cell.
    pub fn advance(&mut self) -> Result<()> {
        let num_cells = self.table.leaf(self.page_id)?.num_cells();

        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Insert `row` under `key` at the current position.
    ///
    /// Cells from the current position onward shift one slot right. The
    /// cursor is left pointing at the new cell.
    ///
    /// # Errors
    /// - `Error::TableFull` if the leaf has no free cell
    /// - `Error::CursorOutOfRange` if the position is past the last cell
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let mut value = [0u8; ROW_SIZE];
        row.serialize(&mut value);

        self.table
            .leaf_mut(self.page_id)?
            .insert_at(self.cell_num, key, &value)?;

        self.end_of_table = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_table() -> (Table, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        (Table::open(&path).unwrap(), dir)
    }

    fn row(id: u32) -> Row {
        Row::new(id, format!("user{}", id), format!("person{}@example.com", id)).unwrap()
    }

    #[test]
    fn test_start_on_empty_table() {
        let (mut table, _dir) = create_test_table();

        let mut cursor = Cursor::table_start(&mut table).unwrap();
        assert!(cursor.end_of_table());
        assert_eq!(cursor.cell_num(), 0);
        assert!(matches!(cursor.value(), Err(Error::CursorOutOfRange)));
    }

    #[test]
    fn test_end_cursor() {
        let (mut table, _dir) = create_test_table();
        for id in 1..=3 {
            Cursor::table_end(&mut table).unwrap().insert(id, &row(id)).unwrap();
        }

        let cursor = Cursor::table_end(&mut table).unwrap();
        assert!(cursor.end_of_table());
        assert_eq!(cursor.cell_num(), 3);
        assert_eq!(cursor.page_id(), PageId::new(0));
    }

    #[test]
    fn test_walk_cells() {
        let (mut table, _dir) = create_test_table();
        for id in [10, 20] {
            Cursor::table_end(&mut table).unwrap().insert(id, &row(id)).unwrap();
        }

        let mut cursor = Cursor::table_start(&mut table).unwrap();
        assert!(!cursor.end_of_table());
        assert_eq!(cursor.key().unwrap(), 10);
        assert_eq!(Row::deserialize(cursor.value().unwrap()), row(10));

        cursor.advance().unwrap();
        assert!(!cursor.end_of_table());
        assert_eq!(cursor.key().unwrap(), 20);

        cursor.advance().unwrap();
        assert!(cursor.end_of_table());
    }

    #[test]
    fn test_insert_at_cell_shifts() {
        let (mut table, _dir) = create_test_table();
        for id in [1, 3] {
            Cursor::table_end(&mut table).unwrap().insert(id, &row(id)).unwrap();
        }

        let mut cursor = Cursor::at_cell(&mut table, 1).unwrap();
        assert!(!cursor.end_of_table());
        cursor.insert(2, &row(2)).unwrap();
        assert_eq!(cursor.key().unwrap(), 2);

        let root = table.root_page();
        let keys: Vec<u32> = table.leaf(root).unwrap().keys().collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_past_end_is_error() {
        let (mut table, _dir) = create_test_table();

        let result = Cursor::at_cell(&mut table, 5).unwrap().insert(5, &row(5));
        assert!(matches!(result, Err(Error::CursorOutOfRange)));

        let root = table.root_page();
        assert_eq!(table.leaf(root).unwrap().num_cells(), 0);
    }
}
