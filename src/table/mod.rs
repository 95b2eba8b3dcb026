//! # Table
//!
//! `Table` is the public entry point of the storage engine: one file, one
//! schema, one root leaf. Callers open it, insert and select records, and
//! close it to make their inserts durable.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Table  (root_page_num = 0)               │
//! │   insert(record) ──> Cursor::end ──┐     │
//! │   select()       ──> Cursor::start ┤     │
//! ├────────────────────────────────────┼─────┤
//! │ Pager  (owns file + page buffers)  ▼     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - Page 0 is always the root leaf. Opening an empty file formats it; opening
//!   a non-empty file checks it.
//! - Inserts always append at the end of the leaf, so `select` returns records
//!   in insertion order, not id order. Duplicate ids are accepted.
//! - Nothing reaches the file until [`Table::close`]. Dropping a table without
//!   closing it discards every change since open.
//!
//! ## Error Handling
//!
//! A full table is an expected outcome and comes back as
//! [`InsertResult::TableFull`]. I/O failures and corrupt pages are `eyre`
//! errors.

mod builder;

pub use builder::TableBuilder;

use std::path::Path;

use eyre::Result;
use tracing::debug;

use crate::btree::{Cursor, LeafNode, LeafNodeMut, ROOT_PAGE_NUM};
use crate::config::LEAF_NODE_MAX_CELLS;
use crate::record::Record;
use crate::storage::Pager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Success,
    TableFull,
}

#[derive(Debug)]
pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Opens `path` with the default page limit.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().path(path).open()
    }

    pub(crate) fn open_with_config(path: &Path, max_pages: u32) -> Result<Self> {
        let mut pager = Pager::open(path, max_pages)?;
        let root_page_num = ROOT_PAGE_NUM;

        if pager.num_pages() == 0 {
            let page = pager.get_page(root_page_num)?;
            let mut root = LeafNodeMut::init(&mut page[..])?;
            root.set_root(true);
            debug!(path = %path.display(), "initialized empty root leaf");
        } else {
            let page = pager.get_page(root_page_num)?;
            let root = LeafNode::from_page(&page[..])?;
            debug!(
                path = %path.display(),
                cell_count = root.cell_count(),
                "opened table"
            );
        }

        Ok(Self {
            pager,
            root_page_num,
        })
    }

    pub fn start(&mut self) -> Result<Cursor<'_>> {
        Cursor::start(&mut self.pager, self.root_page_num)
    }

    pub fn end(&mut self) -> Result<Cursor<'_>> {
        Cursor::end(&mut self.pager, self.root_page_num)
    }

    pub fn num_rows(&mut self) -> Result<u32> {
        let page = self.pager.get_page(self.root_page_num)?;
        Ok(LeafNode::from_page(&page[..])?.cell_count())
    }

    /// Appends `record` keyed by its id.
    pub fn insert(&mut self, record: &Record) -> Result<InsertResult> {
        if self.num_rows()? as usize >= LEAF_NODE_MAX_CELLS {
            return Ok(InsertResult::TableFull);
        }

        let mut cursor = self.end()?;
        cursor.insert(record.id, record)?;
        Ok(InsertResult::Success)
    }

    /// Iterates over every record from the first cell to the last.
    pub fn select(&mut self) -> Result<Rows<'_>> {
        Ok(Rows {
            cursor: self.start()?,
            done: false,
        })
    }

    /// Keys of the root leaf in cell order.
    pub fn leaf_keys(&mut self) -> Result<Vec<u32>> {
        let page = self.pager.get_page(self.root_page_num)?;
        let leaf = LeafNode::from_page(&page[..])?;
        (0..leaf.cell_count() as usize)
            .map(|i| leaf.key_at(i))
            .collect()
    }

    pub fn path(&self) -> &Path {
        self.pager.path()
    }

    pub fn max_pages(&self) -> u32 {
        self.pager.max_pages()
    }

    pub fn num_pages(&self) -> u32 {
        self.pager.num_pages()
    }

    /// Flushes every resident page and closes the file.
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }
}

/// Lazy scan over the table, yielding one decoded record per cell.
///
/// Stops after the first error.
pub struct Rows<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.at_end() {
            return None;
        }

        let result = self
            .cursor
            .record()
            .and_then(|record| self.cursor.advance().map(|_| record));
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
