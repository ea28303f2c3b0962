//! Table - the single-leaf tree over a pager.

use std::path::Path;

use crate::common::{Error, PageId, Result};
use crate::pager::{Pager, PagerStats};
use crate::storage::page::leaf::LEAF_NODE_MAX_CELLS;
use crate::storage::page::{LeafNode, Page};

/// A table of [`Row`](super::Row)s stored in one root leaf page.
///
/// The table owns the [`Pager`] and knows which page is the root. It has no
/// record API of its own: reads and writes go through a
/// [`Cursor`](super::Cursor).
///
/// Today the tree is exactly one leaf (page 0), so "tree" and "leaf page"
/// coincide. The root is still addressed through [`root_page`](Self::root_page)
/// so a split can later move it.
pub struct Table {
    pager: Pager,
    root_page: PageId,
}

impl Table {
    /// Open (or create) a table file.
    ///
    /// A file with zero pages gets page 0 formatted as an empty root leaf.
    ///
    /// # Errors
    /// - Pager errors (`Io`, `CorruptFile`)
    /// - `Error::CorruptPage` if page 0 is not a leaf or claims more cells
    ///   than fit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut pager = Pager::open(path)?;
        let root_page = PageId::new(0);

        if pager.num_pages() == 0 {
            let mut root = LeafNode::new(pager.get_page_mut(root_page)?);
            root.initialize();
            root.set_root(true);
            tracing::debug!(root = root_page.0, "initialized empty root leaf");
        } else {
            let root = LeafNode::new(pager.get_page(root_page)?);
            if !root.is_leaf() || root.num_cells() > LEAF_NODE_MAX_CELLS as u32 {
                tracing::error!(
                    root = root_page.0,
                    cells = root.num_cells(),
                    "root page is not a valid leaf"
                );
                return Err(Error::CorruptPage(root_page.0));
            }
        }

        tracing::debug!(pages = pager.num_pages(), "opened table");
        Ok(Self { pager, root_page })
    }

    /// Flush every resident page and release the pager.
    ///
    /// Consumes the table; a closed table cannot be used or closed again.
    pub fn close(self) -> Result<()> {
        tracing::debug!("closing table");
        self.pager.close()
    }

    #[inline]
    pub fn root_page(&self) -> PageId {
        self.root_page
    }

    /// Leaf view of `page_id` for reading.
    pub fn leaf(&mut self, page_id: PageId) -> Result<LeafNode<&Page>> {
        Ok(LeafNode::new(self.pager.get_page(page_id)?))
    }

    /// Leaf view of `page_id` for writing.
    pub(crate) fn leaf_mut(&mut self, page_id: PageId) -> Result<LeafNode<&mut Page>> {
        Ok(LeafNode::new(self.pager.get_page_mut(page_id)?))
    }

    /// Page holding `page_id`, for cursors that hand out raw row bytes.
    pub(crate) fn page(&mut self, page_id: PageId) -> Result<&Page> {
        self.pager.get_page(page_id)
    }

    pub fn stats(&self) -> &PagerStats {
        self.pager.stats()
    }
}
