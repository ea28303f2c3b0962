//! Page - one `PAGE_SIZE` block of the database file held in memory.

use crate::common::config::PAGE_SIZE;

/// An in-memory copy of one file page.
///
/// Pages are boxed by the [`Pager`](crate::pager::Pager) and never copied.
/// Typed access to the bytes goes through node views such as
/// [`LeafNode`](super::LeafNode), which take the page through
/// `AsRef<[u8]>` / `AsMut<[u8]>`.
///
/// # Example
/// ```
/// use rowstore::{LeafNode, Page};
///
/// let mut page = Page::new();
/// LeafNode::new(&mut page).initialize();
/// assert!(LeafNode::new(&page).is_leaf());
/// ```
#[repr(align(4096))]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// An all-zero page, which is also what a never-written page reads as.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zero every byte before the page is refilled from disk.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for Page {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Page {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
