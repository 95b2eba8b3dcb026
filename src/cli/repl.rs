//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop for the leafdb CLI:
//!
//! - Reading input with rustyline (history, line editing)
//! - Dispatching meta-commands vs statements
//! - Printing statement results
//!
//! ## Execution Flow
//!
//! ```text
//!            read line ("db > ")
//!                   │
//!          starts with '.'?
//!          │ yes           │ no
//!          ▼               ▼
//!   CommandHandler     prepare()
//!          │               │ Ok          Err ──> print PrepareError
//!          │               ▼
//!          │           execute()
//!          │               │
//!          ▼               ▼
//!             print result ──> loop
//! ```
//!
//! ## Exit
//!
//! `.exit` and Ctrl+D both leave the loop, save history and close the table,
//! which flushes every page. Ctrl+C only discards the current line.
//!
//! ## Error Handling
//!
//! Parse errors, unknown commands and a full table are printed and the loop
//! continues. A storage error ends the REPL and is returned to the caller.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::statement::{self, format_row, ExecuteResult};
use crate::table::Table;

const PROMPT: &str = "db > ";

pub struct Repl {
    table: Table,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(table: Table) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            if let Err(e) = editor.load_history(&history_file) {
                debug!(path = %history_file.display(), error = %e, "no history loaded");
            }
        }

        Ok(Self { table, editor })
    }

    /// Runs until `.exit` or end of input, then closes the table.
    pub fn run(mut self) -> Result<()> {
        let result = self.read_loop();
        self.save_history();
        result?;

        self.table.close()
    }

    fn read_loop(&mut self) -> Result<()> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !self.handle_line(&line)? {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    return Ok(());
                }
                Err(err) => {
                    return Err(err).wrap_err("failed to read input");
                }
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(true);
        }

        self.editor.add_history_entry(trimmed).ok();

        if CommandHandler::is_command(trimmed) {
            return Ok(self.execute_command(trimmed));
        }

        self.execute_statement(trimmed)?;
        Ok(true)
    }

    fn execute_command(&mut self, input: &str) -> bool {
        match CommandHandler::execute(input, &mut self.table) {
            CommandResult::Exit => false,
            CommandResult::Output(text) => {
                println!("{}", text);
                true
            }
            CommandResult::Continue => true,
            CommandResult::Error(msg) => {
                println!("{}", msg);
                true
            }
        }
    }

    fn execute_statement(&mut self, input: &str) -> Result<()> {
        let statement = match statement::prepare(input) {
            Ok(statement) => statement,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };

        match statement::execute(&statement, &mut self.table)? {
            ExecuteResult::Inserted => println!("Executed."),
            ExecuteResult::TableFull => println!("Error: Table full."),
            ExecuteResult::Rows(rows) => {
                for row in &rows {
                    println!("{}", format_row(row));
                }
                println!("Executed.");
            }
        }
        Ok(())
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                warn!(path = %history_file.display(), error = %e, "could not save history");
            }
        }
    }
}
