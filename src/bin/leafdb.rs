//! # leafdb CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Open or create a table file
//! leafdb ./users.db
//!
//! # Show version
//! leafdb --version
//!
//! # Show help
//! leafdb --help
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `LEAFDB_LOG` to a filter
//! directive such as `debug` or `leafdb::storage=trace` to see them.

use eyre::{bail, Result};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use leafdb::cli::Repl;
use leafdb::Table;

const LOG_ENV_VAR: &str = "LEAFDB_LOG";

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("leafdb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> Result<()> {
    let mut db_path: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("leafdb {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if db_path.is_some() {
                    bail!("Multiple database files specified");
                }
                db_path = Some(PathBuf::from(path));
            }
        }
    }

    let Some(db_path) = db_path else {
        println!("Must supply a database filename.");
        std::process::exit(1);
    };

    let table = Table::open(&db_path)?;
    Repl::new(table)?.run()
}

fn print_usage() {
    println!("leafdb - single-table record store");
    println!();
    println!("USAGE:");
    println!("    leafdb [OPTIONS] <DATABASE_FILE>");
    println!();
    println!("ARGS:");
    println!("    <DATABASE_FILE>    Table file, created if it does not exist");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    LEAFDB_HISTORY     History file (empty disables history)");
    println!("    LEAFDB_LOG         Log filter directive (default: warn)");
}
