//! # leafdb - Single-Table Page Store
//!
//! leafdb persists records of one fixed schema `(id, username, email)` in a
//! file of 4KB pages. The table is a single-level B-tree: the root page is a
//! leaf node holding up to 13 records.
//!
//! ## Quick Start
//!
//! ```ignore
//! use leafdb::{InsertResult, Record, Table};
//!
//! let mut table = Table::open("./users.db")?;
//! let record = Record::new(1, "user1", "person1@example.com")?;
//! assert_eq!(table.insert(&record)?, InsertResult::Success);
//!
//! for row in table.select()? {
//!     println!("{:?}", row?);
//! }
//! table.close()?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (REPL, meta-commands)         │
//! ├─────────────────────────────────────┤
//! │   Statements (prepare / execute)    │
//! ├─────────────────────────────────────┤
//! │   Table (insert / select / close)   │
//! ├─────────────────────────────────────┤
//! │   Cursor + Leaf Node layout         │
//! ├──────────────────┬──────────────────┤
//! │   Record codec   │   Pager (file)   │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! ## File Layout
//!
//! ```text
//! users.db
//! ├── page 0   root leaf: 10-byte header + 13 cells of 297 bytes
//! ├── page 1   (unused while the tree is a single leaf)
//! └── ...
//! ```
//!
//! ## Durability
//!
//! Pages are written back only by [`Table::close`]. There is no journal; a
//! process that exits without closing the table loses its inserts.
//!
//! ## Module Overview
//!
//! - [`config`]: Layout constants and their compile-time checks
//! - [`record`]: Fixed-width record codec
//! - [`storage`]: File-backed page cache
//! - [`btree`]: Leaf node layout and cursor
//! - [`table`]: Table facade and builder
//! - [`statement`]: `insert` / `select` parsing and execution
//! - [`cli`]: Interactive REPL

#[macro_use]
mod macros;

pub mod btree;
pub mod cli;
pub mod config;
pub mod record;
pub mod statement;
pub mod storage;
pub mod table;

pub use record::{Email, FixedText, Record, RecordError, Username};
pub use statement::{ExecuteResult, PrepareError, Statement};
pub use table::{InsertResult, Rows, Table, TableBuilder};
