//! Page cache.
//!
//! The pager sits between the table and the database file. It owns every
//! in-memory page buffer for the lifetime of an open table.
//!
//! # Components
//! - [`Pager`] - The page cache
//! - [`PagerStats`] - Hit/miss and I/O counters

#[allow(clippy::module_inception)]
mod pager;
mod stats;

pub use pager::Pager;
pub use stats::PagerStats;
