//! # Single-Level B-Tree
//!
//! The tree is a single leaf node living in the root page. Cells are stored
//! densely in the order they were inserted at, and a [`Cursor`] walks or
//! extends them.
//!
//! ## Architecture Overview
//!
//! ```text
//! Table ──> Cursor ──> LeafNodeMut / LeafNode ──> Pager page buffer
//!            (page_num, cell_num)   (zero-copy views)
//! ```
//!
//! ## Node Types
//!
//! - **Leaf Nodes**: header plus an array of `(key, record)` cells. This is
//!   the only kind of node ever written.
//!
//! - **Internal Nodes**: `NodeKind::Internal` is reserved in the header byte
//!   so the file format can grow internal nodes without changing leaf pages.
//!   Nothing creates them: a full root leaf ends the table's growth.
//!
//! ## Capacity
//!
//! ```text
//! LEAF_NODE_SPACE_FOR_CELLS = 4096 - 10 = 4086
//! LEAF_NODE_CELL_SIZE       = 4 + 293   = 297
//! LEAF_NODE_MAX_CELLS       = 4086 / 297 = 13
//! ```
//!
//! ## Module Organization
//!
//! - `leaf`: Leaf page layout and the `LeafNode` / `LeafNodeMut` views
//! - `cursor`: Positioned access and insertion (`Cursor`)

mod cursor;
mod leaf;

pub use cursor::Cursor;
pub use leaf::{LeafHeader, LeafNode, LeafNodeMut, NodeKind};

pub const ROOT_PAGE_NUM: u32 = 0;
