//! # Meta-Command Handler
//!
//! Lines starting with a period are meta-commands. They control the REPL or
//! inspect the table and are never passed to the statement parser.
//!
//! ## Supported Commands
//!
//! | Command       | Description                               |
//! |---------------|-------------------------------------------|
//! | `.exit`       | Close the table and exit                  |
//! | `.btree`      | Print the root leaf and its keys          |
//! | `.constants`  | Print the page and node layout constants  |
//! | `.help`       | Show available commands                   |
//!
//! ## Parsing
//!
//! Commands are case-sensitive and must match exactly, apart from
//! surrounding whitespace. Anything else comes back as
//! `CommandResult::Error` and the REPL keeps going.

use crate::config::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS, ROW_SIZE,
};
use crate::table::Table;

#[derive(Debug, PartialEq)]
pub enum CommandResult {
    Output(String),
    Exit,
    Continue,
    Error(String),
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn is_command(input: &str) -> bool {
        input.trim().starts_with('.')
    }

    pub fn execute(input: &str, table: &mut Table) -> CommandResult {
        let input = input.trim();

        match input {
            "" => CommandResult::Continue,
            ".exit" => CommandResult::Exit,
            ".btree" => print_tree(table),
            ".constants" => CommandResult::Output(constants_text()),
            ".help" => CommandResult::Output(help_text()),
            _ => CommandResult::Error(format!("Unrecognized command '{}'", input)),
        }
    }
}

fn help_text() -> String {
    r#"leafdb commands:

  insert <id> <username> <email>   Add a record
  select                           Print every record

  .exit        Close the table and exit
  .btree       Print the root leaf and its keys
  .constants   Print layout constants
  .help        Show this help message

Use Ctrl+C to clear the current line.
Use Ctrl+D or .exit to exit."#
        .to_string()
}

fn constants_text() -> String {
    let lines: Vec<String> = [
        ("ROW_SIZE", ROW_SIZE),
        ("COMMON_NODE_HEADER_SIZE", COMMON_NODE_HEADER_SIZE),
        ("LEAF_NODE_HEADER_SIZE", LEAF_NODE_HEADER_SIZE),
        ("LEAF_NODE_CELL_SIZE", LEAF_NODE_CELL_SIZE),
        ("LEAF_NODE_SPACE_FOR_CELLS", LEAF_NODE_SPACE_FOR_CELLS),
        ("LEAF_NODE_MAX_CELLS", LEAF_NODE_MAX_CELLS),
    ]
    .iter()
    .map(|(name, value)| format!("{}: {}", name, value))
    .collect();

    format!("Constants:\n{}", lines.join("\n"))
}

fn print_tree(table: &mut Table) -> CommandResult {
    let keys = match table.leaf_keys() {
        Ok(keys) => keys,
        Err(e) => return CommandResult::Error(format!("could not read tree: {}", e)),
    };

    let mut lines = vec!["Tree:".to_string(), format!("- leaf (size {})", keys.len())];
    lines.extend(
        keys.iter()
            .enumerate()
            .map(|(i, key)| format!("  - {} : {}", i, key)),
    );
    CommandResult::Output(lines.join("\n"))
}
