//! # leafdb CLI Module
//!
//! An interactive prompt over a single table, in the style of the classic
//! `db > ` teaching database:
//!
//! - `insert` / `select` statements
//! - Meta-commands for table introspection
//! - Persistent line history
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                      (bin/leafdb.rs)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         REPL Loop                           │
//! │  - Reads input via rustyline                                │
//! │  - Dispatches to meta-commands or the statement layer       │
//! ├─────────────────────────────────────────────────────────────┤
//! │        Commands            │             History            │
//! │  (.exit, .btree,           │     ~/.leafdb_history          │
//! │   .constants, .help)       │                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! leafdb ./users.db
//! db > insert 1 user1 person1@example.com
//! Executed.
//! db > select
//! (1, user1, person1@example.com)
//! Executed.
//! db > .exit
//! ```
//!
//! ## Module Organization
//!
//! - `repl`: Read-eval-print loop with rustyline integration
//! - `commands`: Meta-command parsing and execution
//! - `history`: History file path resolution

pub mod commands;
pub mod history;
pub mod repl;

pub use repl::Repl;
