//! # leafdb Layout Constants
//!
//! This module centralizes every size and offset that defines the on-disk
//! format. Constants that depend on each other are co-located and derived from
//! one another so a single edit cannot leave the format inconsistent.
//!
//! ## Dependency Graph
//!
//! ```text
//! ID_SIZE (4) + USERNAME_SIZE (33) + EMAIL_SIZE (256)
//!       │
//!       └─> ROW_SIZE (293)
//!             │
//!             └─> LEAF_NODE_CELL_SIZE (LEAF_NODE_KEY_SIZE + ROW_SIZE = 297)
//!
//! PAGE_SIZE (4096)
//!       │
//!       ├─> COMMON_NODE_HEADER_SIZE (node_kind 1 + is_root 1 + parent 4 = 6)
//!       │
//!       ├─> LEAF_NODE_HEADER_SIZE (common header + cell_count 4 = 10)
//!       │
//!       └─> LEAF_NODE_SPACE_FOR_CELLS (PAGE_SIZE - LEAF_NODE_HEADER_SIZE = 4086)
//!             │
//!             └─> LEAF_NODE_MAX_CELLS (4086 / 297 = 13)
//!
//! TABLE_MAX_PAGES (100)
//!       └─> hard ceiling on the page numbers the pager will ever index
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by compile-time assertions below:
//!
//! 1. Text columns reserve one byte beyond their maximum length for the NUL terminator
//! 2. `ROW_SIZE` is the packed sum of the column widths (no padding)
//! 3. A leaf page holds at least one cell, and never more than fit in `PAGE_SIZE`
//!
//! ## Usage
//!
//! ```ignore
//! use crate::config::{PAGE_SIZE, LEAF_NODE_MAX_CELLS};
//! ```

// ============================================================================
// RECORD LAYOUT
// Column widths of the single fixed schema: (id, username, email)
// ============================================================================

/// Longest username accepted, in bytes.
pub const USERNAME_MAX_LEN: usize = 32;

/// Longest email accepted, in bytes.
pub const EMAIL_MAX_LEN: usize = 255;

/// Encoded width of the `id` column.
pub const ID_SIZE: usize = size_of::<u32>();

/// Encoded width of the `username` column, terminator included.
pub const USERNAME_SIZE: usize = USERNAME_MAX_LEN + 1;

/// Encoded width of the `email` column, terminator included.
pub const EMAIL_SIZE: usize = EMAIL_MAX_LEN + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Encoded width of one record. Columns are packed back to back.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

const _: () = assert!(
    EMAIL_OFFSET + EMAIL_SIZE == ROW_SIZE,
    "record columns must be packed without padding"
);

const _: () = assert!(ROW_SIZE == 293, "ROW_SIZE is part of the file format");

// ============================================================================
// PAGE LAYOUT
// ============================================================================

/// Size of each page in bytes. The unit of file I/O and caching.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages the pager will index. Pages are never evicted, so
/// this bounds the total size of a table file at `PAGE_SIZE * TABLE_MAX_PAGES`.
pub const TABLE_MAX_PAGES: u32 = 100;

// ============================================================================
// NODE LAYOUT
// Common header shared by every node kind, followed by the leaf header
// ============================================================================

pub const NODE_TYPE_SIZE: usize = size_of::<u8>();
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = size_of::<u8>();
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = size_of::<u32>();
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

pub const LEAF_NODE_KEY_SIZE: usize = size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;

/// Number of cells a single leaf page can hold. Inserting past this is an
/// error until leaf splitting exists.
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

const _: () = assert!(
    LEAF_NODE_HEADER_SIZE == LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE,
    "leaf header derivation mismatch"
);

const _: () = assert!(LEAF_NODE_MAX_CELLS >= 1, "a leaf page must hold at least one cell");

const _: () = assert!(
    LEAF_NODE_HEADER_SIZE + LEAF_NODE_MAX_CELLS * LEAF_NODE_CELL_SIZE <= PAGE_SIZE,
    "leaf cells overflow the page"
);
