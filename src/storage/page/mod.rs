//! Page types and layout.
//!
//! This module contains:
//! - [`Page`] - The raw 4KB data container
//! - [`NodeHeader`] - Metadata at the start of every node page
//! - [`NodeType`] - Discriminator for node formats
//! - [`LeafNode`] - Accessors for the leaf cell array

#[allow(clippy::module_inception)]
mod page;
pub mod leaf;
mod node_header;

pub use leaf::LeafNode;
pub use node_header::{NodeHeader, NodeType};
pub use page::Page;
