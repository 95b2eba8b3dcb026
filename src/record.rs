//! # Fixed-Width Record Codec
//!
//! leafdb stores exactly one schema: `(id, username, email)`. Every record
//! encodes to the same number of bytes, so a leaf cell can hold it at a fixed
//! offset and the codec never needs a length prefix or an offset table.
//!
//! ## Record Binary Layout
//!
//! ```text
//! Offset  Size  Column     Encoding
//! ------  ----  ---------  -------------------------------------------
//! 0       4     id         u32, little-endian
//! 4       33    username   UTF-8 bytes, NUL terminated, zero padded
//! 37      256   email      UTF-8 bytes, NUL terminated, zero padded
//! ------  ----
//! 293     total (ROW_SIZE)
//! ```
//!
//! Columns are packed back to back; the width is the sum of the column
//! constants in [`crate::config`], never `size_of` of a padded struct.
//!
//! ## Text Columns
//!
//! Text lives in [`FixedText`], an inline buffer with a hard capacity. A value
//! that does not fit is rejected when the record is built and is never
//! truncated. A NUL byte inside the text is rejected as well, since on disk it
//! would be read back as the terminator.
//!
//! ## Error Handling
//!
//! Building a record returns [`RecordError`] so callers can report the
//! problem and carry on. Decoding returns `eyre::Result`: bytes that fail to
//! decode come from a corrupt page and are not recoverable.

use eyre::{ensure, Result};
use std::fmt;

use crate::config::{
    EMAIL_MAX_LEN, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_MAX_LEN,
    USERNAME_OFFSET, USERNAME_SIZE,
};

pub type Username = FixedText<USERNAME_MAX_LEN>;
pub type Email = FixedText<EMAIL_MAX_LEN>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    TextTooLong {
        column: &'static str,
        len: usize,
        max: usize,
    },
    EmbeddedNul {
        column: &'static str,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::TextTooLong { column, len, max } => write!(
                f,
                "{} is {} bytes long but the column holds at most {}",
                column, len, max
            ),
            RecordError::EmbeddedNul { column } => {
                write!(f, "{} must not contain a NUL byte", column)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Capacity-bounded inline text holding at most `CAP` bytes of UTF-8.
///
/// `buf[..len]` is always valid UTF-8 without NUL bytes; both constructors
/// check it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedText<const CAP: usize> {
    buf: [u8; CAP],
    len: usize,
}

impl<const CAP: usize> FixedText<CAP> {
    pub const CAPACITY: usize = CAP;

    fn from_str_in(column: &'static str, text: &str) -> Result<Self, RecordError> {
        let bytes = text.as_bytes();
        if bytes.len() > CAP {
            return Err(RecordError::TextTooLong {
                column,
                len: bytes.len(),
                max: CAP,
            });
        }
        if bytes.contains(&0) {
            return Err(RecordError::EmbeddedNul { column });
        }

        let mut buf = [0u8; CAP];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len(),
        })
    }

    /// Reads a terminated column. `field` is the full on-disk column width.
    fn decode_field(column: &'static str, field: &[u8]) -> Result<Self> {
        let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        ensure!(
            len <= CAP,
            "corrupt {} column: {} bytes before terminator, capacity is {}",
            column,
            len,
            CAP
        );
        std::str::from_utf8(&field[..len])
            .map_err(|e| eyre::eyre!("corrupt {} column: {}", column, e))?;

        let mut buf = [0u8; CAP];
        buf[..len].copy_from_slice(&field[..len]);
        Ok(Self { buf, len })
    }

    /// Writes the text followed by zero padding across the whole column.
    fn encode_field(&self, field: &mut [u8]) {
        field[..self.len].copy_from_slice(self.as_bytes());
        field[self.len..].fill(0);
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: every constructor verifies buf[..len] is UTF-8 and the buffer
        // is never mutated afterwards.
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const CAP: usize> fmt::Debug for FixedText<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const CAP: usize> fmt::Display for FixedText<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const CAP: usize> PartialEq<str> for FixedText<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const CAP: usize> PartialEq<&str> for FixedText<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub username: Username,
    pub email: Email,
}

impl Record {
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self, RecordError> {
        Ok(Self {
            id,
            username: FixedText::from_str_in("username", username)?,
            email: FixedText::from_str_in("email", email)?,
        })
    }

    pub fn encode(&self) -> [u8; ROW_SIZE] {
        let mut out = [0u8; ROW_SIZE];
        self.encode_into(&mut out);
        out
    }

    pub fn encode_into(&self, dst: &mut [u8; ROW_SIZE]) {
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        self.username
            .encode_field(&mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        self.email
            .encode_field(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
    }

    pub fn decode(src: &[u8]) -> Result<Self> {
        ensure!(
            src.len() >= ROW_SIZE,
            "buffer too small for record: {} < {}",
            src.len(),
            ROW_SIZE
        );

        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Ok(Self {
            id: u32::from_le_bytes(id),
            username: FixedText::decode_field(
                "username",
                &src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            )?,
            email: FixedText::decode_field("email", &src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE])?,
        })
    }
}
