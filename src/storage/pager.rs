//! # Pager
//!
//! `Pager` owns the table file and a direct-mapped array of page buffers
//! indexed by page number. It is the only component that performs file I/O.
//!
//! ## Page Lifecycle
//!
//! ```text
//!            get_page(n)                  close()
//!   Absent ─────────────────> Resident ─────────────> Absent
//!                              │    ▲
//!                              └────┘ get_page(n) returns the same buffer
//! ```
//!
//! A page becomes resident the first time it is requested and stays resident
//! until the pager is closed. There is no eviction and no dirty tracking:
//! callers mutate the returned buffer in place and `close()` writes back every
//! resident page.
//!
//! ## File Format
//!
//! The file is a plain concatenation of pages:
//!
//! ```text
//! Offset 0:        Page 0 (4KB)
//! Offset 4096:     Page 1 (4KB)
//! Offset 8192:     Page 2 (4KB)
//! ...
//! ```
//!
//! A file whose length is not a multiple of `PAGE_SIZE` has a torn trailing
//! page and is refused at open.
//!
//! ## Capacity
//!
//! The buffer array grows up to `max_pages` slots (default
//! [`TABLE_MAX_PAGES`](crate::config::TABLE_MAX_PAGES)), one slot per page
//! number requested so far. Requesting a page number at or beyond the limit
//! is an error, which makes `PAGE_SIZE * max_pages` the largest file a table
//! can grow to.
//!
//! ## Error Handling
//!
//! Every fallible operation returns `eyre::Result` carrying the file path and
//! page number. Nothing is retried or rolled back: an error while closing may
//! leave some pages written and others not.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{ensure, eyre, Result, WrapErr};
use tracing::{debug, trace};

use super::PAGE_SIZE;

pub type PageBuf = [u8; PAGE_SIZE];

#[derive(Debug)]
pub struct Pager {
    file: File,
    path: PathBuf,
    file_length: u64,
    num_pages: u32,
    max_pages: u32,
    pages: Vec<Option<Box<PageBuf>>>,
}

impl Pager {
    pub fn open<P: AsRef<Path>>(path: P, max_pages: u32) -> Result<Self> {
        let path = path.as_ref();

        ensure!(max_pages > 0, "max_pages must be at least 1");

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .wrap_err_with(|| format!("failed to open database file '{}'", path.display()))?;

        let file_length = file
            .metadata()
            .wrap_err_with(|| format!("failed to get metadata for '{}'", path.display()))?
            .len();

        ensure!(
            file_length % PAGE_SIZE as u64 == 0,
            "database file '{}' size {} is not a whole number of pages ({} bytes each); the file is corrupt",
            path.display(),
            file_length,
            PAGE_SIZE
        );

        let num_pages = file_length / PAGE_SIZE as u64;
        ensure!(
            num_pages <= max_pages as u64,
            "database file '{}' holds {} pages, more than the maximum of {}",
            path.display(),
            num_pages,
            max_pages
        );

        debug!(
            path = %path.display(),
            file_length,
            num_pages,
            max_pages,
            "opened pager"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            file_length,
            num_pages: num_pages as u32,
            max_pages,
            pages: Vec::new(),
        })
    }

    /// Returns the buffer for `page_num`, loading it from disk on first use.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut PageBuf> {
        ensure!(
            page_num < self.max_pages,
            "tried to fetch page number out of bounds: {} >= {}",
            page_num,
            self.max_pages
        );

        let idx = page_num as usize;
        if idx >= self.pages.len() {
            self.pages.resize_with(idx + 1, || None);
        }

        let page = match self.pages[idx].take() {
            Some(page) => page,
            None => {
                let page = self.load_page(page_num)?;
                if page_num >= self.num_pages {
                    self.num_pages = page_num + 1;
                }
                page
            }
        };

        Ok(&mut **self.pages[idx].insert(page))
    }

    fn load_page(&mut self, page_num: u32) -> Result<Box<PageBuf>> {
        let mut page = Box::new([0u8; PAGE_SIZE]);

        let pages_on_disk = self.file_length.div_ceil(PAGE_SIZE as u64);
        if (page_num as u64) >= pages_on_disk {
            trace!(page_num, "allocated fresh page");
            return Ok(page);
        }

        let offset = page_num as u64 * PAGE_SIZE as u64;
        self.file
            .seek(SeekFrom::Start(offset))
            .wrap_err_with(|| format!("failed to seek to page {} in '{}'", page_num, self.path.display()))?;

        let mut filled = 0;
        while filled < PAGE_SIZE {
            match self.file.read(&mut page[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(e).wrap_err_with(|| {
                        format!("failed to read page {} from '{}'", page_num, self.path.display())
                    })
                }
            }
        }

        debug!(page_num, bytes = filled, "loaded page from disk");
        Ok(page)
    }

    /// Writes the resident buffer for `page_num` back to its file offset.
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        let page = self
            .pages
            .get(page_num as usize)
            .and_then(|slot| slot.as_deref())
            .ok_or_else(|| eyre!("tried to flush page {} which is not resident", page_num))?;

        let offset = page_num as u64 * PAGE_SIZE as u64;
        self.file
            .seek(SeekFrom::Start(offset))
            .wrap_err_with(|| format!("failed to seek to page {} in '{}'", page_num, self.path.display()))?;
        self.file
            .write_all(page)
            .wrap_err_with(|| format!("failed to write page {} to '{}'", page_num, self.path.display()))?;

        self.file_length = self.file_length.max(offset + PAGE_SIZE as u64);
        trace!(page_num, "flushed page");
        Ok(())
    }

    /// Flushes every resident page, syncs the file and releases all buffers.
    pub fn close(mut self) -> Result<()> {
        let mut flushed = 0u32;
        for page_num in 0..self.num_pages {
            if self.is_resident(page_num) {
                self.flush(page_num)?;
                flushed += 1;
            }
        }

        self.file
            .sync_all()
            .wrap_err_with(|| format!("failed to sync '{}'", self.path.display()))?;

        self.pages.clear();
        debug!(path = %self.path.display(), flushed, "closed pager");
        Ok(())
    }

    pub fn is_resident(&self, page_num: u32) -> bool {
        matches!(self.pages.get(page_num as usize), Some(Some(_)))
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let pager = Pager::open(&path, 10).unwrap();

        assert!(path.exists());
        assert_eq!(pager.num_pages(), 0);
        assert_eq!(pager.file_length(), 0);
    }

    #[test]
    fn fresh_page_is_zeroed_and_counted() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), 10).unwrap();

        let page = pager.get_page(3).unwrap();
        assert!(page.iter().all(|&b| b == 0));

        assert!(pager.is_resident(3));
        assert!(!pager.is_resident(2));
        assert_eq!(pager.num_pages(), 4);
    }

    #[test]
    fn get_page_returns_same_buffer() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), 10).unwrap();

        pager.get_page(0).unwrap()[100] = 0xAB;
        let first = pager.get_page(0).unwrap().as_ptr();
        let second = pager.get_page(0).unwrap().as_ptr();

        assert_eq!(first, second);
        assert_eq!(pager.get_page(0).unwrap()[100], 0xAB);
    }

    #[test]
    fn close_persists_resident_pages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut pager = Pager::open(&path, 10).unwrap();
        pager.get_page(0).unwrap()[0] = 1;
        pager.get_page(1).unwrap()[PAGE_SIZE - 1] = 2;
        pager.close().unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 2 * PAGE_SIZE as u64);

        let mut pager = Pager::open(&path, 10).unwrap();
        assert_eq!(pager.num_pages(), 2);
        assert_eq!(pager.get_page(0).unwrap()[0], 1);
        assert_eq!(pager.get_page(1).unwrap()[PAGE_SIZE - 1], 2);
    }

    #[test]
    fn close_writes_gap_pages_only_if_resident() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut pager = Pager::open(&path, 10).unwrap();
        pager.get_page(2).unwrap()[0] = 9;
        pager.close().unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 3 * PAGE_SIZE as u64);

        let mut pager = Pager::open(&path, 10).unwrap();
        assert!(pager.get_page(0).unwrap().iter().all(|&b| b == 0));
        assert_eq!(pager.get_page(2).unwrap()[0], 9);
    }

    #[test]
    fn open_rejects_partial_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("torn.db");
        std::fs::write(&path, vec![0u8; PAGE_SIZE + 17]).unwrap();

        let err = Pager::open(&path, 10).unwrap_err();
        assert!(err.to_string().contains("not a whole number of pages"));
    }

    #[test]
    fn open_rejects_file_larger_than_ceiling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.db");
        std::fs::write(&path, vec![0u8; 3 * PAGE_SIZE]).unwrap();

        assert!(Pager::open(&path, 2).is_err());
        assert!(Pager::open(&path, 3).is_ok());
    }

    #[test]
    fn page_at_ceiling_is_rejected() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), 5).unwrap();

        assert!(pager.get_page(4).is_ok());

        let err = pager.get_page(5).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn flush_of_absent_page_fails() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), 5).unwrap();

        let err = pager.flush(1).unwrap_err();
        assert!(err.to_string().contains("not resident"));
        assert!(pager.flush(99).is_err());
    }

    #[test]
    fn flush_extends_file_length() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), 5).unwrap();

        pager.get_page(1).unwrap();
        pager.flush(1).unwrap();

        assert_eq!(pager.file_length(), 2 * PAGE_SIZE as u64);
    }

    #[test]
    fn huge_max_pages_does_not_preallocate() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), u32::MAX).unwrap();

        assert_eq!(pager.max_pages(), u32::MAX);
        pager.get_page(0).unwrap()[0] = 7;
        assert_eq!(pager.get_page(0).unwrap()[0], 7);
        assert!(!pager.is_resident(1));
    }

    #[test]
    fn zero_max_pages_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(Pager::open(dir.path().join("test.db"), 0).is_err());
    }
}
