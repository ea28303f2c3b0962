//! Node header and type definitions.
//!
//! Every node page starts with a [`NodeHeader`]:
//! - [`NodeType`] discriminator
//! - root flag
//! - parent page reference, kept for when nodes can split

use crate::common::PageId;

/// Kind of node stored in a page.
///
/// Uses `#[repr(u8)]` to guarantee a 1-byte on-disk representation.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Branching node. Never written today; reserved in the format.
    Internal = 0,
    /// Node holding (key, row) cells.
    Leaf = 1,
}

impl NodeType {
    /// Convert from u8, returning `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(NodeType::Internal),
            1 => Some(NodeType::Leaf),
            _ => None,
        }
    }
}

/// Metadata shared by every node kind.
///
/// # Layout (8 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       1     node_type (NodeType as u8)
/// 1       1     is_root (0 or 1)
/// 2       4     parent (PageId, little-endian)
/// 6       2     padding (zero)
/// ```
///
/// The padding keeps the leaf cell count that follows 4-byte aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    /// `None` if the tag byte holds an unknown value.
    pub node_type: Option<NodeType>,
    pub is_root: bool,
    pub parent: PageId,
}

impl NodeHeader {
    /// Size of the common header in bytes, padding included.
    pub const SIZE: usize = 8;

    pub const OFFSET_NODE_TYPE: usize = 0;
    pub const OFFSET_IS_ROOT: usize = 1;
    pub const OFFSET_PARENT: usize = 2;

    /// Header for a fresh node with no parent.
    pub fn new(node_type: NodeType, is_root: bool) -> Self {
        Self {
            node_type: Some(node_type),
            is_root,
            parent: PageId::INVALID,
        }
    }

    /// Read a header from the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeHeader::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Self {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeHeader");

        let parent = u32::from_le_bytes([
            data[Self::OFFSET_PARENT],
            data[Self::OFFSET_PARENT + 1],
            data[Self::OFFSET_PARENT + 2],
            data[Self::OFFSET_PARENT + 3],
        ]);

        Self {
            node_type: NodeType::from_u8(data[Self::OFFSET_NODE_TYPE]),
            is_root: data[Self::OFFSET_IS_ROOT] != 0,
            parent: PageId::new(parent),
        }
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// An unknown node type is written as `0xFF`.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeHeader");

        data[Self::OFFSET_NODE_TYPE] = self.node_type.map_or(0xFF, |t| t as u8);
        data[Self::OFFSET_IS_ROOT] = u8::from(self.is_root);
        data[Self::OFFSET_PARENT..Self::OFFSET_PARENT + 4]
            .copy_from_slice(&self.parent.0.to_le_bytes());
        data[Self::OFFSET_PARENT + 4..Self::SIZE].fill(0);
    }
}

// ============================================================================
// TESTS
// ============================================================================
