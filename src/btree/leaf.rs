//! # Leaf Node Layout
//!
//! A leaf node occupies exactly one page: a 10-byte header followed by a dense
//! array of fixed-size cells. Every cell holds a `u32` key and one encoded
//! record, so cell `i` always starts at `LEAF_NODE_HEADER_SIZE + i * LEAF_NODE_CELL_SIZE`
//! and no slot array or free-space bookkeeping is needed.
//!
//! ## Page Layout
//!
//! ```text
//! Offset  Size  Field           Description
//! ------  ----  --------------  ------------------------------------
//! 0       1     node_kind       0 = internal, 1 = leaf
//! 1       1     is_root         boolean (0 / 1)
//! 2       4     parent_pointer  page number of the parent node
//! 6       4     cell_count      number of occupied cells
//! 10      297   cell 0          key (4) + record (293)
//! 307     297   cell 1
//! ...
//! 3574    297   cell 12         last cell that fits (LEAF_NODE_MAX_CELLS = 13)
//! 3871    225   unused
//! ```
//!
//! All integers are little-endian.
//!
//! ## Insertion
//!
//! Inserting at index `i` moves cells `[i, cell_count)` one slot toward the
//! tail, starting from the last cell so nothing is overwritten, then writes
//! the new cell into the hole. The node does not check key order or
//! duplicates; that is up to the caller choosing `i`.
//!
//! A full node rejects the insert. Splitting a leaf (and with it internal
//! nodes) is where the single-page tree would grow into a real B-tree.
//!
//! ## Zero-Copy Views
//!
//! `LeafNode` and `LeafNodeMut` borrow a page buffer and interpret it in
//! place; nothing is copied out except the record bytes the caller decodes.

use std::mem::offset_of;

use eyre::{ensure, Result, WrapErr};
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{
    IS_ROOT_OFFSET, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_KEY_OFFSET,
    LEAF_NODE_KEY_SIZE, LEAF_NODE_MAX_CELLS, LEAF_NODE_NUM_CELLS_OFFSET, LEAF_NODE_VALUE_OFFSET,
    LEAF_NODE_VALUE_SIZE, NODE_TYPE_OFFSET, PAGE_SIZE, PARENT_POINTER_OFFSET, ROW_SIZE,
};
use crate::record::Record;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Internal = 0,
    Leaf = 1,
    Unknown = 0xFF,
}

impl NodeKind {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => NodeKind::Internal,
            1 => NodeKind::Leaf,
            _ => NodeKind::Unknown,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct LeafHeader {
    node_kind: u8,
    is_root: u8,
    parent_pointer: U32,
    cell_count: U32,
}

const _: () = assert!(size_of::<LeafHeader>() == LEAF_NODE_HEADER_SIZE);
const _: () = assert!(offset_of!(LeafHeader, node_kind) == NODE_TYPE_OFFSET);
const _: () = assert!(offset_of!(LeafHeader, is_root) == IS_ROOT_OFFSET);
const _: () = assert!(offset_of!(LeafHeader, parent_pointer) == PARENT_POINTER_OFFSET);
const _: () = assert!(offset_of!(LeafHeader, cell_count) == LEAF_NODE_NUM_CELLS_OFFSET);

impl LeafHeader {
    crate::zerocopy_accessors! {
        parent_pointer: u32,
        cell_count: u32,
    }

    pub fn node_kind(&self) -> NodeKind {
        NodeKind::from_byte(self.node_kind)
    }

    pub fn set_node_kind(&mut self, kind: NodeKind) {
        self.node_kind = kind as u8;
    }

    pub fn is_root(&self) -> bool {
        self.is_root != 0
    }

    pub fn set_root(&mut self, is_root: bool) {
        self.is_root = is_root as u8;
    }
}

fn cell_offset(index: usize) -> usize {
    index * LEAF_NODE_CELL_SIZE
}

fn check_page(data: &[u8]) -> Result<()> {
    ensure!(
        data.len() == PAGE_SIZE,
        "invalid page size: {} != {}",
        data.len(),
        PAGE_SIZE
    );
    Ok(())
}

fn check_header(header: &LeafHeader) -> Result<()> {
    ensure!(
        header.node_kind() == NodeKind::Leaf,
        "expected leaf node, got {:?}",
        header.node_kind()
    );
    ensure!(
        header.cell_count() as usize <= LEAF_NODE_MAX_CELLS,
        "corrupt leaf node: cell_count {} exceeds maximum {}",
        header.cell_count(),
        LEAF_NODE_MAX_CELLS
    );
    Ok(())
}

#[derive(Debug)]
pub struct LeafNode<'a> {
    header: &'a LeafHeader,
    cells: &'a [u8],
}

pub struct LeafNodeMut<'a> {
    header: &'a mut LeafHeader,
    cells: &'a mut [u8],
}

impl<'a> LeafNode<'a> {
    pub fn from_page(data: &'a [u8]) -> Result<Self> {
        check_page(data)?;
        let (header, cells) = LeafHeader::ref_from_prefix(data)
            .map_err(|e| eyre::eyre!("failed to read leaf header: {:?}", e))?;
        check_header(header)?;
        Ok(Self { header, cells })
    }

    pub fn cell_count(&self) -> u32 {
        self.header.cell_count()
    }

    pub fn is_root(&self) -> bool {
        self.header.is_root()
    }

    pub fn parent_pointer(&self) -> u32 {
        self.header.parent_pointer()
    }

    pub fn node_kind(&self) -> NodeKind {
        self.header.node_kind()
    }

    pub fn cell_at(&self, index: usize) -> Result<&'a [u8]> {
        ensure!(
            index < self.cell_count() as usize,
            "cell index {} out of bounds (cell_count={})",
            index,
            self.cell_count()
        );
        let offset = cell_offset(index);
        Ok(&self.cells[offset..offset + LEAF_NODE_CELL_SIZE])
    }

    pub fn key_at(&self, index: usize) -> Result<u32> {
        let cell = self.cell_at(index)?;
        let mut key = [0u8; LEAF_NODE_KEY_SIZE];
        key.copy_from_slice(&cell[LEAF_NODE_KEY_OFFSET..LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE]);
        Ok(u32::from_le_bytes(key))
    }

    pub fn value_at(&self, index: usize) -> Result<&'a [u8]> {
        let cell = self.cell_at(index)?;
        Ok(&cell[LEAF_NODE_VALUE_OFFSET..LEAF_NODE_VALUE_OFFSET + LEAF_NODE_VALUE_SIZE])
    }
}

impl<'a> LeafNodeMut<'a> {
    pub fn from_page(data: &'a mut [u8]) -> Result<Self> {
        check_page(data)?;
        let (header, cells) = LeafHeader::mut_from_prefix(data)
            .map_err(|e| eyre::eyre!("failed to read leaf header: {:?}", e))?;
        check_header(header)?;
        Ok(Self { header, cells })
    }

    /// Formats `data` as an empty, non-root leaf with no parent.
    pub fn init(data: &'a mut [u8]) -> Result<Self> {
        check_page(data)?;
        let (header, cells) = LeafHeader::mut_from_prefix(data)
            .map_err(|e| eyre::eyre!("failed to read leaf header: {:?}", e))?;
        header.set_node_kind(NodeKind::Leaf);
        header.set_root(false);
        header.set_parent_pointer(0);
        header.set_cell_count(0);
        Ok(Self { header, cells })
    }

    pub fn cell_count(&self) -> u32 {
        self.header.cell_count()
    }

    pub fn set_root(&mut self, is_root: bool) {
        self.header.set_root(is_root);
    }

    pub fn set_parent_pointer(&mut self, page_num: u32) {
        self.header.set_parent_pointer(page_num);
    }

    /// Writes `(key, record)` at `index`, shifting later cells one slot right.
    pub fn insert_cell_at(&mut self, index: usize, key: u32, record: &Record) -> Result<()> {
        let cell_count = self.cell_count() as usize;
        ensure!(
            cell_count < LEAF_NODE_MAX_CELLS,
            "leaf node is full ({} cells); splitting a leaf node is not implemented",
            cell_count
        );
        ensure!(
            index <= cell_count,
            "insert index {} out of bounds (cell_count={})",
            index,
            cell_count
        );

        for i in (index..cell_count).rev() {
            let src = cell_offset(i);
            self.cells
                .copy_within(src..src + LEAF_NODE_CELL_SIZE, cell_offset(i + 1));
        }

        let offset = cell_offset(index);
        let cell = &mut self.cells[offset..offset + LEAF_NODE_CELL_SIZE];
        cell[LEAF_NODE_KEY_OFFSET..LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE]
            .copy_from_slice(&key.to_le_bytes());
        let value: &mut [u8; ROW_SIZE] = (&mut cell
            [LEAF_NODE_VALUE_OFFSET..LEAF_NODE_VALUE_OFFSET + LEAF_NODE_VALUE_SIZE])
            .try_into()
            .wrap_err("leaf cell value width does not match ROW_SIZE")?;
        record.encode_into(value);

        self.header.set_cell_count(cell_count as u32 + 1);
        Ok(())
    }

    pub fn as_view(&self) -> LeafNode<'_> {
        LeafNode {
            header: &*self.header,
            cells: &*self.cells,
        }
    }
}
