//! Configuration constants for rowstore.
//!
//! Every layout size and offset in the crate derives from the widths declared
//! here, so they are all evaluated at compile time.

use std::mem::size_of;

/// Size of a page in bytes (4KB).
///
/// Pages are the unit of both file I/O and caching. Page N lives at file
/// offset `N × PAGE_SIZE`.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages the pager will hold.
///
/// Requests for a page index at or beyond this limit fail with
/// [`Error::PageOutOfBounds`](crate::Error::PageOutOfBounds).
pub const TABLE_MAX_PAGES: usize = 100;

/// Fixed width of the `username` column in bytes.
pub const COLUMN_USERNAME_SIZE: usize = 32;

/// Fixed width of the `email` column in bytes.
pub const COLUMN_EMAIL_SIZE: usize = 255;

// ============================================================================
// ROW LAYOUT
// ============================================================================

pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Packed size of one row.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;
