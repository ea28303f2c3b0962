//! rowstore - a single-table persistent row store on a paged leaf-node file.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            rowstore                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Execution Layer (execution/)                │   │
//! │  │      Statement / MetaCommand → execute → Rows            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Table Layer (table/)                       │   │
//! │  │           Table + Cursor + Row codec                     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Page Cache (pager/)                        │   │
//! │  │        Pager: fixed slot array, load-once pages          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Storage Layer (storage/)                   │   │
//! │  │     DiskManager + Page + NodeHeader + LeafNode           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Error, layout constants)
//! - [`storage`] - Disk I/O and page formats
//! - [`pager`] - Page cache
//! - [`table`] - Table, cursor, and row codec
//! - [`execution`] - Statement parsing and execution
//!
//! # Quick Start
//! ```no_run
//! use rowstore::execution::{execute_insert, execute_select};
//! use rowstore::{Row, Table};
//!
//! let mut table = Table::open("my_database.db")?;
//! execute_insert(&mut table, &Row::new(1, "user1", "person1@example.com")?)?;
//! for row in execute_select(&mut table)? {
//!     println!("{}", row);
//! }
//! table.close()?;
//! # Ok::<(), rowstore::Error>(())
//! ```

pub mod common;
pub mod execution;
pub mod pager;
pub mod storage;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use common::config::{PAGE_SIZE, ROW_SIZE, TABLE_MAX_PAGES};
pub use common::{Error, PageId, Result};

pub use pager::{Pager, PagerStats};
pub use storage::page::leaf::LEAF_NODE_MAX_CELLS;
pub use storage::page::{LeafNode, NodeHeader, NodeType, Page};
pub use storage::DiskManager;
pub use table::{Cursor, Row, Table};
