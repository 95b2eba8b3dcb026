//! # Cursor
//!
//! A `Cursor` is a position `(page_num, cell_num)` inside the tree plus an
//! `end_of_table` flag. It is the only way the table reads or writes cells.
//!
//! ## Borrowing
//!
//! The cursor holds `&mut Pager` for its whole lifetime. Pages are loaded on
//! demand for every access instead of being cached in the cursor, and the
//! exclusive borrow means no other cursor (and no `Table` method) can run
//! while one is alive. A cursor cannot be held across an insert made by
//! someone else.
//!
//! ## Positions
//!
//! ```text
//! start():  cell_num = 0            end_of_table = (cell_count == 0)
//! end():    cell_num = cell_count   end_of_table = true
//! advance() moves one cell right and sets end_of_table past the last cell
//! insert()  writes at cell_num and leaves the cursor on the new cell
//! ```
//!
//! With a single root leaf there is nothing to descend into, so `start` and
//! `end` only need the root page number.

use eyre::{ensure, Result};
use tracing::trace;

use super::leaf::{LeafNode, LeafNodeMut};
use crate::record::Record;
use crate::storage::Pager;

pub struct Cursor<'a> {
    pager: &'a mut Pager,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn start(pager: &'a mut Pager, root_page: u32) -> Result<Self> {
        let cell_count = Self::leaf_cell_count(pager, root_page)?;
        Ok(Self {
            pager,
            page_num: root_page,
            cell_num: 0,
            end_of_table: cell_count == 0,
        })
    }

    pub fn end(pager: &'a mut Pager, root_page: u32) -> Result<Self> {
        let cell_count = Self::leaf_cell_count(pager, root_page)?;
        Ok(Self {
            pager,
            page_num: root_page,
            cell_num: cell_count,
            end_of_table: true,
        })
    }

    fn leaf_cell_count(pager: &mut Pager, page_num: u32) -> Result<u32> {
        let page = pager.get_page(page_num)?;
        Ok(LeafNode::from_page(&page[..])?.cell_count())
    }

    pub fn at_end(&self) -> bool {
        self.end_of_table
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    pub fn key(&mut self) -> Result<u32> {
        ensure!(!self.end_of_table, "cursor is past the last cell");
        let page = self.pager.get_page(self.page_num)?;
        LeafNode::from_page(&page[..])?.key_at(self.cell_num as usize)
    }

    /// Raw record bytes of the current cell, borrowed from the page buffer.
    pub fn value(&mut self) -> Result<&[u8]> {
        ensure!(!self.end_of_table, "cursor is past the last cell");
        let page: &[u8] = self.pager.get_page(self.page_num)?;
        LeafNode::from_page(page)?.value_at(self.cell_num as usize)
    }

    pub fn record(&mut self) -> Result<Record> {
        Record::decode(self.value()?)
    }

    pub fn advance(&mut self) -> Result<bool> {
        if self.end_of_table {
            return Ok(false);
        }

        self.cell_num += 1;

        let cell_count = Self::leaf_cell_count(self.pager, self.page_num)?;
        if self.cell_num >= cell_count {
            self.end_of_table = true;
            return Ok(false);
        }
        Ok(true)
    }

    /// Inserts `(key, record)` at the cursor position.
    ///
    /// Cells at and after the position move one slot right. The leaf must
    /// have a free cell; a full leaf is an error because leaves do not split.
    /// Afterwards the cursor points at the new cell.
    pub fn insert(&mut self, key: u32, record: &Record) -> Result<()> {
        let page = self.pager.get_page(self.page_num)?;
        let mut leaf = LeafNodeMut::from_page(&mut page[..])?;
        leaf.insert_cell_at(self.cell_num as usize, key, record)?;
        self.end_of_table = false;

        trace!(
            page_num = self.page_num,
            cell_num = self.cell_num,
            key,
            "inserted cell"
        );
        Ok(())
    }
}
