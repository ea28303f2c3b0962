//! Disk Manager - page-granular reads and writes on the table file.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result};
use crate::storage::page::Page;

/// Owns the open table file and moves whole pages in and out of it.
///
/// Page `n` lives at byte offset `n * PAGE_SIZE`; page 0 holds the root
/// leaf. There is no file header, so a valid file is always a whole number
/// of pages and its length alone gives the page count.
///
/// Writes are buffered by the OS until [`sync`](Self::sync), which the
/// pager calls once on close.
pub struct DiskManager {
    file: File,
    /// Current length of the file in bytes.
    file_length: u64,
}

impl DiskManager {
    /// Open the database file, creating it if it doesn't exist.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be opened or created
    /// - `Error::CorruptFile` if its length is not a multiple of `PAGE_SIZE`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_ref())?;

        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(Error::CorruptFile { len: file_length });
        }

        tracing::debug!(
            path = %path.as_ref().display(),
            file_length,
            "opened database file"
        );

        Ok(Self { file, file_length })
    }

    /// Read a page from disk into `page`.
    ///
    /// A page past the end of the file is left zeroed. A trailing partial
    /// page is read as far as the file goes and zero-filled beyond that.
    /// Returns the number of bytes actually read.
    pub fn read_page(&mut self, page_id: PageId, page: &mut Page) -> Result<usize> {
        page.reset();

        let offset = page_id.file_offset();
        if offset >= self.file_length {
            return Ok(0);
        }

        let available = (self.file_length - offset).min(PAGE_SIZE as u64) as usize;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut page.as_mut_slice()[..available])?;

        Ok(available)
    }

    /// Write a full page to disk at its offset, extending the file if needed.
    ///
    /// # Errors
    /// A short write surfaces as `Error::Io` (`WriteZero`).
    pub fn write_page(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        let offset = page_id.file_offset();
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(page.as_slice())?;

        self.file_length = self.file_length.max(offset + PAGE_SIZE as u64);
        Ok(())
    }

    /// Flush file contents and metadata to stable storage.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Number of pages on disk, counting a trailing partial page.
    #[inline]
    pub fn page_count(&self) -> u32 {
        self.file_length.div_ceil(PAGE_SIZE as u64) as u32
    }

    /// File length in bytes as of the last open or write.
    #[inline]
    pub fn file_size(&self) -> u64 {
        self.file_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let dm = DiskManager::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(dm.page_count(), 0);
        assert_eq!(dm.file_size(), 0);
    }

    #[test]
    fn test_open_rejects_partial_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        std::fs::write(&path, vec![0u8; PAGE_SIZE + 100]).unwrap();

        match DiskManager::open(&path) {
            Err(Error::CorruptFile { len }) => assert_eq!(len, (PAGE_SIZE + 100) as u64),
            _ => panic!("Expected CorruptFile error"),
        }
    }

    #[test]
    fn test_write_and_read_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut dm = DiskManager::open(&path).unwrap();

        let mut page = Page::new();
        page.as_mut_slice()[0] = 0xAB;
        page.as_mut_slice()[4095] = 0xEF;
        dm.write_page(PageId::new(0), &page).unwrap();
        assert_eq!(dm.page_count(), 1);

        let mut read_back = Page::new();
        let n = dm.read_page(PageId::new(0), &mut read_back).unwrap();
        assert_eq!(n, PAGE_SIZE);
        assert_eq!(read_back.as_slice()[0], 0xAB);
        assert_eq!(read_back.as_slice()[4095], 0xEF);
    }

    #[test]
    fn test_read_beyond_end_is_zeroed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut dm = DiskManager::open(&path).unwrap();

        let mut page = Page::new();
        page.as_mut_slice()[10] = 0xFF;
        let n = dm.read_page(PageId::new(3), &mut page).unwrap();

        assert_eq!(n, 0);
        assert_eq!(page.as_slice()[10], 0);
    }

    #[test]
    fn test_read_partial_page_zero_fills() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut dm = DiskManager::open(&path).unwrap();
        // File grows behind our back by a partial page
        dm.file.write_all(&[0x11u8; 100]).unwrap();
        dm.file_length = 100;
        assert_eq!(dm.page_count(), 1);

        let mut page = Page::new();
        page.as_mut_slice()[200] = 0xFF;
        let n = dm.read_page(PageId::new(0), &mut page).unwrap();

        assert_eq!(n, 100);
        assert_eq!(page.as_slice()[99], 0x11);
        assert_eq!(page.as_slice()[100], 0);
        assert_eq!(page.as_slice()[200], 0);
    }

    #[test]
    fn test_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let mut dm = DiskManager::open(&path).unwrap();
            let mut page = Page::new();
            page.as_mut_slice()[0] = 0x42;
            dm.write_page(PageId::new(1), &page).unwrap();
            dm.sync().unwrap();
        }

        {
            let mut dm = DiskManager::open(&path).unwrap();
            assert_eq!(dm.page_count(), 2);

            let mut page = Page::new();
            dm.read_page(PageId::new(1), &mut page).unwrap();
            assert_eq!(page.as_slice()[0], 0x42);
        }
    }
}
