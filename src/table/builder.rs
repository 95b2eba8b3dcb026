//! # Table Builder
//!
//! `TableBuilder` configures and opens a [`Table`](super::Table).
//!
//! ## Configuration Options
//!
//! | Option    | Default          | Description                                |
//! |-----------|------------------|--------------------------------------------|
//! | path      | (required)       | Table file, created if it does not exist   |
//! | max_pages | TABLE_MAX_PAGES  | Page cache slots; also the file size limit |
//!
//! ## Usage
//!
//! ```ignore
//! let table = Table::builder()
//!     .path("./users.db")
//!     .max_pages(16)
//!     .open()?;
//! ```

use std::path::{Path, PathBuf};

use eyre::Result;

use super::Table;
use crate::config::TABLE_MAX_PAGES;

/// Builder for configuring and opening a leafdb table.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    path: Option<PathBuf>,
    max_pages: u32,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            path: None,
            max_pages: TABLE_MAX_PAGES,
        }
    }

    /// Sets the table file. It is created on open if missing.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets how many pages the pager may hold.
    ///
    /// An existing file with more pages than this fails to open.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Opens or creates the table with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No path was specified (call `path()` first)
    /// - `max_pages` is zero
    /// - The file cannot be opened, or its size is not a whole number of pages
    /// - Page 0 of an existing file is not a leaf node
    pub fn open(self) -> Result<Table> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| eyre::eyre!("table path not specified: call .path() first"))?;
        Table::open_with_config(path, self.max_pages)
    }

    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_max_pages(&self) -> u32 {
        self.max_pages
    }
}
