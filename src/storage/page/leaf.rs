//! Leaf node layout.
//!
//! A [`LeafNode`] interprets a page buffer as the common [`NodeHeader`], a
//! cell count, and a packed, key-sorted array of cells:
//!
//! ```text
//! ┌────────────┬────────────┬──────────────────┬──────────────────┬─────┐
//! │ NodeHeader │ num_cells  │ cell 0           │ cell 1           │ ... │
//! │ (8 bytes)  │ (4 bytes)  │ key(4) + row(291)│ key(4) + row(291)│     │
//! └────────────┴────────────┴──────────────────┴──────────────────┴─────┘
//! Offset: 0        8          12                 307
//! ```

use std::cmp::Ordering;
use std::mem::size_of;
use std::ops::Range;

use crate::common::config::{PAGE_SIZE, ROW_SIZE};
use crate::common::{Error, Result};

use super::node_header::{NodeHeader, NodeType};

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

pub const COMMON_NODE_HEADER_SIZE: usize = NodeHeader::SIZE;

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

pub const LEAF_NODE_KEY_SIZE: usize = size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;

pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;

/// Number of cells that fit in one leaf page.
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Byte offset of cell `cell` within a page.
///
/// # Panics
/// Panics if `cell >= LEAF_NODE_MAX_CELLS`.
#[inline]
pub fn cell_offset(cell: u32) -> usize {
    let cell = cell as usize;
    assert!(
        cell < LEAF_NODE_MAX_CELLS,
        "cell index {} exceeds leaf capacity {}",
        cell,
        LEAF_NODE_MAX_CELLS
    );
    LEAF_NODE_HEADER_SIZE + cell * LEAF_NODE_CELL_SIZE
}

/// Byte range of the row stored in cell `cell`.
#[inline]
pub fn value_range(cell: u32) -> Range<usize> {
    let start = cell_offset(cell) + LEAF_NODE_VALUE_OFFSET;
    start..start + LEAF_NODE_VALUE_SIZE
}

/// A view over a page buffer laid out as a leaf node.
///
/// Generic over the buffer so the same accessors serve `&Page`,
/// `&mut Page` and plain byte arrays. Mutators need `B: AsMut<[u8]>`.
///
/// # Example
/// ```
/// use rowstore::storage::page::{LeafNode, Page};
///
/// let mut page = Page::new();
/// let mut leaf = LeafNode::new(&mut page);
/// leaf.initialize();
/// leaf.insert_at(0, 7, &[0u8; rowstore::ROW_SIZE]).unwrap();
/// assert_eq!(leaf.num_cells(), 1);
/// assert_eq!(leaf.key(0), 7);
/// ```
pub struct LeafNode<B> {
    data: B,
}

impl<B: AsRef<[u8]>> LeafNode<B> {
    /// Wrap a page buffer.
    ///
    /// # Panics
    /// Panics if the buffer is not exactly `PAGE_SIZE` bytes.
    pub fn new(data: B) -> Self {
        assert_eq!(data.as_ref().len(), PAGE_SIZE, "leaf buffer must be one page");
        Self { data }
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let b = self.bytes();
        u32::from_le_bytes([b[offset], b[offset + 1], b[offset + 2], b[offset + 3]])
    }

    pub fn header(&self) -> NodeHeader {
        NodeHeader::from_bytes(self.bytes())
    }

    pub fn is_leaf(&self) -> bool {
        self.header().node_type == Some(NodeType::Leaf)
    }

    pub fn num_cells(&self) -> u32 {
        self.read_u32(LEAF_NODE_NUM_CELLS_OFFSET)
    }

    pub fn is_full(&self) -> bool {
        self.num_cells() as usize >= LEAF_NODE_MAX_CELLS
    }

    /// Key stored in cell `cell`.
    pub fn key(&self, cell: u32) -> u32 {
        self.read_u32(cell_offset(cell) + LEAF_NODE_KEY_OFFSET)
    }

    /// Packed row bytes stored in cell `cell`.
    pub fn value(&self, cell: u32) -> &[u8] {
        &self.bytes()[value_range(cell)]
    }

    /// Keys of every occupied cell, in cell order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.num_cells()).map(move |cell| self.key(cell))
    }

    /// Binary search for `key` among the occupied cells.
    ///
    /// Returns `Ok(cell)` if the key is present, otherwise `Err(cell)` with
    /// the index of the first key greater than `key` (where it would be
    /// inserted).
    pub fn find(&self, key: u32) -> std::result::Result<u32, u32> {
        let mut low = 0;
        let mut high = self.num_cells();

        while low < high {
            let mid = low + (high - low) / 2;
            match self.key(mid).cmp(&key) {
                Ordering::Equal => return Ok(mid),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }
        Err(low)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> LeafNode<B> {
    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }

    fn write_u32(&mut self, offset: usize, value: u32) {
        self.bytes_mut()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Format the buffer as an empty, non-root leaf.
    pub fn initialize(&mut self) {
        NodeHeader::new(NodeType::Leaf, false).write_to(self.bytes_mut());
        self.set_num_cells(0);
    }

    pub fn set_root(&mut self, is_root: bool) {
        let mut header = self.header();
        header.is_root = is_root;
        header.write_to(self.bytes_mut());
    }

    pub fn set_num_cells(&mut self, num_cells: u32) {
        self.write_u32(LEAF_NODE_NUM_CELLS_OFFSET, num_cells);
    }

    pub fn set_key(&mut self, cell: u32, key: u32) {
        self.write_u32(cell_offset(cell) + LEAF_NODE_KEY_OFFSET, key);
    }

    pub fn value_mut(&mut self, cell: u32) -> &mut [u8] {
        &mut self.bytes_mut()[value_range(cell)]
    }

    /// Insert a cell at `cell`, shifting cells `[cell, num_cells)` one slot
    /// to the right.
    ///
    /// Keeps the array sorted only if the caller picked `cell` from
    /// [`find`](Self::find).
    ///
    /// # Errors
    /// - `Error::TableFull` if the leaf has no free cell
    /// - `Error::CursorOutOfRange` if `cell > num_cells`
    ///
    /// # Panics
    /// Panics if `value.len() != ROW_SIZE`.
    pub fn insert_at(&mut self, cell: u32, key: u32, value: &[u8]) -> Result<()> {
        let num_cells = self.num_cells();
        if num_cells as usize >= LEAF_NODE_MAX_CELLS {
            return Err(Error::TableFull);
        }
        if cell > num_cells {
            return Err(Error::CursorOutOfRange);
        }
        assert_eq!(value.len(), LEAF_NODE_VALUE_SIZE, "row must be ROW_SIZE bytes");

        // Highest cell first so no cell is overwritten before it moves.
        for i in (cell + 1..=num_cells).rev() {
            let src = cell_offset(i - 1);
            let dst = cell_offset(i);
            self.bytes_mut()
                .copy_within(src..src + LEAF_NODE_CELL_SIZE, dst);
        }

        self.set_key(cell, key);
        self.value_mut(cell).copy_from_slice(value);
        self.set_num_cells(num_cells + 1);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::page::Page;

    fn row_bytes(tag: u8) -> [u8; ROW_SIZE] {
        [tag; ROW_SIZE]
    }

    fn empty_leaf() -> Page {
        let mut page = Page::new();
        LeafNode::new(&mut page).initialize();
        page
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(COMMON_NODE_HEADER_SIZE, 8);
        assert_eq!(LEAF_NODE_HEADER_SIZE, 12);
        assert_eq!(LEAF_NODE_CELL_SIZE, 295);
        assert_eq!(LEAF_NODE_SPACE_FOR_CELLS, 4084);
        assert_eq!(LEAF_NODE_MAX_CELLS, 13);
    }

    #[test]
    fn test_cell_offsets() {
        assert_eq!(cell_offset(0), 12);
        assert_eq!(cell_offset(1), 12 + 295);
        assert_eq!(value_range(0), 16..16 + ROW_SIZE);
        // Last cell must fit in the page
        let last = (LEAF_NODE_MAX_CELLS - 1) as u32;
        assert!(value_range(last).end <= PAGE_SIZE);
    }

    #[test]
    #[should_panic(expected = "exceeds leaf capacity")]
    fn test_cell_offset_out_of_bounds() {
        cell_offset(LEAF_NODE_MAX_CELLS as u32);
    }

    #[test]
    fn test_initialize() {
        let mut page = Page::new();
        page.as_mut_slice()[LEAF_NODE_NUM_CELLS_OFFSET] = 9;

        let mut leaf = LeafNode::new(&mut page);
        leaf.initialize();

        assert!(leaf.is_leaf());
        assert!(!leaf.header().is_root);
        assert_eq!(leaf.num_cells(), 0);

        leaf.set_root(true);
        assert!(leaf.header().is_root);
    }

    #[test]
    fn test_num_cells_byte_layout() {
        let mut page = empty_leaf();
        LeafNode::new(&mut page).set_num_cells(0x0201);

        assert_eq!(page.as_slice()[8], 0x01);
        assert_eq!(page.as_slice()[9], 0x02);
    }

    #[test]
    fn test_insert_shifts_right() {
        let mut page = empty_leaf();
        let mut leaf = LeafNode::new(&mut page);

        leaf.insert_at(0, 10, &row_bytes(1)).unwrap();
        leaf.insert_at(1, 30, &row_bytes(3)).unwrap();
        // 20 goes between them
        leaf.insert_at(1, 20, &row_bytes(2)).unwrap();

        assert_eq!(leaf.num_cells(), 3);
        assert_eq!(leaf.keys().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(leaf.value(0)[0], 1);
        assert_eq!(leaf.value(1)[0], 2);
        assert_eq!(leaf.value(2)[0], 3);
    }

    #[test]
    fn test_insert_at_front() {
        let mut page = empty_leaf();
        let mut leaf = LeafNode::new(&mut page);

        for (i, key) in [50u32, 40, 30].iter().enumerate() {
            leaf.insert_at(0, *key, &row_bytes(i as u8)).unwrap();
        }

        assert_eq!(leaf.keys().collect::<Vec<_>>(), vec![30, 40, 50]);
        assert_eq!(leaf.value(2)[0], 0);
        assert_eq!(leaf.value(0)[ROW_SIZE - 1], 2);
    }

    #[test]
    fn test_insert_when_full() {
        let mut page = empty_leaf();
        let mut leaf = LeafNode::new(&mut page);

        for key in 0..LEAF_NODE_MAX_CELLS as u32 {
            leaf.insert_at(key, key, &row_bytes(0)).unwrap();
        }
        assert!(leaf.is_full());

        let result = leaf.insert_at(0, 999, &row_bytes(0));
        assert!(matches!(result, Err(Error::TableFull)));
        assert_eq!(leaf.num_cells() as usize, LEAF_NODE_MAX_CELLS);
        assert_eq!(leaf.key(0), 0);
    }

    #[test]
    fn test_insert_past_end_rejected() {
        let mut page = empty_leaf();
        let mut leaf = LeafNode::new(&mut page);

        let result = leaf.insert_at(1, 5, &row_bytes(0));
        assert!(matches!(result, Err(Error::CursorOutOfRange)));
        assert_eq!(leaf.num_cells(), 0);

        leaf.insert_at(0, 5, &row_bytes(0)).unwrap();
        assert!(matches!(
            leaf.insert_at(2, 6, &row_bytes(0)),
            Err(Error::CursorOutOfRange)
        ));
        assert_eq!(leaf.num_cells(), 1);
    }

    #[test]
    fn test_find() {
        let mut page = empty_leaf();
        let mut leaf = LeafNode::new(&mut page);
        for (cell, key) in [2u32, 4, 6, 8].iter().enumerate() {
            leaf.insert_at(cell as u32, *key, &row_bytes(0)).unwrap();
        }

        assert_eq!(leaf.find(2), Ok(0));
        assert_eq!(leaf.find(8), Ok(3));
        assert_eq!(leaf.find(1), Err(0));
        assert_eq!(leaf.find(5), Err(2));
        assert_eq!(leaf.find(9), Err(4));
    }

    #[test]
    fn test_find_empty() {
        let page = empty_leaf();
        assert_eq!(LeafNode::new(&page).find(42), Err(0));
    }
}
