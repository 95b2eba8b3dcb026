//! # Storage Module
//!
//! The storage layer maps page numbers to in-memory buffers backed by a single
//! table file. It knows nothing about what a page contains; node layout lives
//! in [`crate::btree`].
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────┐
//! │            Pager             │
//! │  pages: [Option<Box<Page>>]  │  direct-mapped by page number
//! ├──────────────────────────────┤
//! │        std::fs::File         │  seek + read / seek + write
//! └──────────────────────────────┘
//! ```
//!
//! ## Safety Model
//!
//! `Pager::get_page` takes `&mut self` and hands out `&mut [u8; PAGE_SIZE]`.
//! The borrow checker therefore guarantees that at most one caller touches a
//! page buffer at a time and that no page reference outlives `close()`, which
//! consumes the pager.
//!
//! ## Page Size
//!
//! All storage uses 4KB pages, matching the common OS page size so a page
//! write maps onto a single filesystem block.
//!
//! ## Module Organization
//!
//! - `pager`: File-backed page cache (`Pager`)

mod pager;

pub use pager::{PageBuf, Pager};

pub use crate::config::{PAGE_SIZE, TABLE_MAX_PAGES};
