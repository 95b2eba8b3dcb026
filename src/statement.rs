//! # Statements
//!
//! Turns one line of user input into a [`Statement`] and runs it against a
//! [`Table`]. Only two statements exist:
//!
//! ```text
//! insert <id> <username> <email>
//! select
//! ```
//!
//! ## Parsing
//!
//! Keywords are case-sensitive. `insert` must be the first whitespace
//! separated word and must be followed by three more; anything after the
//! email is ignored. `select` must be the whole line.
//!
//! The id is parsed as a signed integer so a negative id gets its own error
//! instead of a generic syntax error. Text columns are checked against their
//! capacity here, so a value that is too long never reaches the table.
//!
//! ## Error Handling
//!
//! [`PrepareError`] is an ordinary, recoverable outcome: the REPL prints it
//! and reads the next line. [`execute`] returns `eyre` errors only for
//! storage failures.

use std::fmt;

use eyre::Result;
use tracing::trace;

use crate::record::{Record, RecordError};
use crate::table::{InsertResult, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Record),
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    SyntaxError,
    NegativeId,
    StringTooLong,
    Unrecognized(String),
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::SyntaxError => write!(f, "Syntax error. Could not parse statement."),
            PrepareError::NegativeId => write!(f, "ID must be positive."),
            PrepareError::StringTooLong => write!(f, "String is too long."),
            PrepareError::Unrecognized(line) => {
                write!(f, "Unrecognized keyword at start of '{}'.", line)
            }
        }
    }
}

impl std::error::Error for PrepareError {}

impl From<RecordError> for PrepareError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::TextTooLong { .. } => PrepareError::StringTooLong,
            RecordError::EmbeddedNul { .. } => PrepareError::SyntaxError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteResult {
    Inserted,
    TableFull,
    Rows(Vec<Record>),
}

pub fn prepare(line: &str) -> Result<Statement, PrepareError> {
    let mut words = line.split_whitespace();

    match words.next() {
        Some("insert") => prepare_insert(words),
        Some("select") if line.trim() == "select" => Ok(Statement::Select),
        _ => Err(PrepareError::Unrecognized(line.to_string())),
    }
}

fn prepare_insert<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Statement, PrepareError> {
    let (Some(id), Some(username), Some(email)) = (args.next(), args.next(), args.next()) else {
        return Err(PrepareError::SyntaxError);
    };

    let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    Ok(Statement::Insert(Record::new(id, username, email)?))
}

pub fn execute(statement: &Statement, table: &mut Table) -> Result<ExecuteResult> {
    match statement {
        Statement::Insert(record) => {
            trace!(id = record.id, "executing insert");
            match table.insert(record)? {
                InsertResult::Success => Ok(ExecuteResult::Inserted),
                InsertResult::TableFull => Ok(ExecuteResult::TableFull),
            }
        }
        Statement::Select => {
            let rows = table.select()?.collect::<Result<Vec<_>>>()?;
            trace!(rows = rows.len(), "executed select");
            Ok(ExecuteResult::Rows(rows))
        }
    }
}

/// Formats a record the way `select` prints it: `(id, username, email)`.
pub fn format_row(record: &Record) -> String {
    format!("({}, {}, {})", record.id, record.username, record.email)
}
