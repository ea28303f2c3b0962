//! Pager - the page cache between the table and the database file.
//!
//! The [`Pager`] provides:
//! - On-demand loading of pages into owned buffers
//! - A fixed-capacity slot array indexed by page number
//! - Write-back of every resident page on close

use std::path::Path;

use crate::common::config::TABLE_MAX_PAGES;
use crate::common::{Error, PageId, Result};
use crate::pager::PagerStats;
use crate::storage::page::Page;
use crate::storage::DiskManager;

/// Caches pages of a single database file.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                        Pager                         │
/// │  ┌──────────────────────────────────────────────┐    │
/// │  │   pages: Vec<Option<Box<Page>>>              │    │
/// │  │   [Some(p0)] [None] [None] ... [None]        │    │
/// │  │    slot index == page number                 │    │
/// │  └──────────────────────────────────────────────┘    │
/// │  ┌──────────────┐  ┌──────────────┐  ┌───────────┐   │
/// │  │  num_pages   │  │ disk_manager │  │   stats   │   │
/// │  └──────────────┘  └──────────────┘  └───────────┘   │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// # Residency
/// A page is loaded at most once. Once resident it stays until
/// [`close`](Self::close), so there is no eviction and a page index is never
/// backed by two buffers.
///
/// # Usage
/// ```no_run
/// use rowstore::{Pager, PageId};
///
/// let mut pager = Pager::open("test.db")?;
/// pager.get_page_mut(PageId::new(0))?.as_mut_slice()[0] = 0xAB;
/// pager.close()?;
/// # Ok::<(), rowstore::Error>(())
/// ```
pub struct Pager {
    /// Handles all disk I/O.
    disk_manager: DiskManager,

    /// Number of pages the table spans, on disk or in memory.
    num_pages: u32,

    /// One slot per page number, `TABLE_MAX_PAGES` long.
    pages: Vec<Option<Box<Page>>>,

    stats: PagerStats,
}

impl Pager {
    /// Open the database file, creating it if absent.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be opened
    /// - `Error::CorruptFile` if the file is not a whole number of pages
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let disk_manager = DiskManager::open(path)?;
        let num_pages = disk_manager.page_count();

        Ok(Self {
            disk_manager,
            num_pages,
            pages: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
            stats: PagerStats::default(),
        })
    }

    // ========================================================================
    // Public API: Fetch pages
    // ========================================================================

    /// Fetch a page for reading, loading it if it isn't resident.
    ///
    /// # Errors
    /// - `Error::PageOutOfBounds` if `page_id >= TABLE_MAX_PAGES`
    /// - I/O errors from the disk read
    pub fn get_page(&mut self, page_id: PageId) -> Result<&Page> {
        self.fetch_page_internal(page_id).map(|page| &*page)
    }

    /// Fetch a page for writing, loading it if it isn't resident.
    ///
    /// # Errors
    /// Same as [`get_page`](Self::get_page).
    pub fn get_page_mut(&mut self, page_id: PageId) -> Result<&mut Page> {
        self.fetch_page_internal(page_id)
    }

    // ========================================================================
    // Public API: Flush pages
    // ========================================================================

    /// Write a resident page back to its file offset.
    ///
    /// # Errors
    /// - `Error::PageNotLoaded` if the page was never loaded
    /// - I/O errors from the disk write
    pub fn flush(&mut self, page_id: PageId) -> Result<()> {
        let page = self
            .pages
            .get(page_id.as_index())
            .and_then(|slot| slot.as_deref())
            .ok_or(Error::PageNotLoaded(page_id.0))?;

        self.disk_manager.write_page(page_id, page)?;
        self.stats.pages_written += 1;

        tracing::debug!(page = page_id.0, "flushed page");
        Ok(())
    }

    /// Flush every resident page.
    pub fn flush_all(&mut self) -> Result<()> {
        for page_num in 0..self.num_pages {
            let page_id = PageId::new(page_num);
            if self.is_loaded(page_id) {
                self.flush(page_id)?;
            }
        }
        Ok(())
    }

    /// Flush every resident page, sync the file, and release all buffers.
    ///
    /// Consumes the pager, so it cannot be used afterwards.
    pub fn close(mut self) -> Result<()> {
        self.flush_all()?;
        self.disk_manager.sync()?;
        self.pages.clear();

        tracing::debug!(pages = self.num_pages, stats = %self.stats, "closed pager");
        Ok(())
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Number of pages the table spans.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Whether `page_id` currently has a resident buffer.
    pub fn is_loaded(&self, page_id: PageId) -> bool {
        matches!(self.pages.get(page_id.as_index()), Some(Some(_)))
    }

    pub fn stats(&self) -> &PagerStats {
        &self.stats
    }

    // ========================================================================
    // Internal: Core fetch logic
    // ========================================================================

    fn fetch_page_internal(&mut self, page_id: PageId) -> Result<&mut Page> {
        let index = page_id.as_index();
        if index >= TABLE_MAX_PAGES {
            return Err(Error::PageOutOfBounds(page_id.0));
        }

        let page = match &mut self.pages[index] {
            Some(page) => {
                self.stats.cache_hits += 1;
                page
            }
            slot => {
                self.stats.cache_misses += 1;

                let mut page = Box::new(Page::new());
                if page_id.0 < self.disk_manager.page_count() {
                    let bytes = self.disk_manager.read_page(page_id, &mut page)?;
                    self.stats.pages_read += 1;
                    tracing::debug!(page = page_id.0, bytes, "loaded page from disk");
                } else {
                    tracing::debug!(page = page_id.0, "allocated new page");
                }

                slot.insert(page)
            }
        };

        if page_id.0 >= self.num_pages {
            self.num_pages = page_id.0 + 1;
        }

        Ok(&mut **page)
    }
}
