use std::fmt;

use crate::common::config::PAGE_SIZE;

/// Page number within the database file.
///
/// Doubles as the slot index into the pager's page array, and as the value
/// stored in a node header's parent pointer.
///
/// # Example
/// ```
/// use rowstore::PageId;
///
/// let root = PageId::new(0);
/// assert!(root.is_valid());
/// assert_eq!(PageId::new(2).file_offset(), 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Parent pointer of a root node.
    pub const INVALID: PageId = PageId(u32::MAX);

    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    #[inline]
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }

    /// Where the page starts in the file.
    #[inline]
    pub fn file_offset(&self) -> u64 {
        u64::from(self.0) * PAGE_SIZE as u64
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INVALID => f.write_str("none"),
            PageId(n) => write!(f, "page {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_no_parent() {
        assert!(!PageId::INVALID.is_valid());
        assert_eq!(PageId::INVALID.0.to_le_bytes(), [0xFF; 4]);
    }

    #[test]
    fn test_file_offset() {
        assert_eq!(PageId::new(0).file_offset(), 0);
        assert_eq!(PageId::new(99).file_offset(), 99 * PAGE_SIZE as u64);
    }

    #[test]
    fn test_display() {
        assert_eq!(PageId::new(7).to_string(), "page 7");
        assert_eq!(PageId::INVALID.to_string(), "none");
    }
}
