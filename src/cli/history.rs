//! # History File Management
//!
//! By default, REPL history is stored in `~/.leafdb_history`.
//!
//! ## Configuration
//!
//! The `LEAFDB_HISTORY` environment variable overrides the location:
//!
//! ```bash
//! export LEAFDB_HISTORY=/custom/path/history
//! leafdb ./users.db
//! ```
//!
//! Setting it to an empty string disables history persistence.

use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".leafdb_history";
pub const HISTORY_ENV_VAR: &str = "LEAFDB_HISTORY";

pub fn history_path() -> Option<PathBuf> {
    resolve(env::var(HISTORY_ENV_VAR).ok(), home_dir())
}

fn resolve(custom: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match custom {
        Some(path) if path.is_empty() => None,
        Some(path) => Some(PathBuf::from(path)),
        None => home.map(|home| home.join(DEFAULT_HISTORY_FILE)),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_path_is_in_home() {
        let path = resolve(None, Some(PathBuf::from("/home/alice")));
        assert_eq!(path, Some(PathBuf::from("/home/alice/.leafdb_history")));
    }

    #[test]
    fn no_home_means_no_history() {
        assert_eq!(resolve(None, None), None);
    }

    #[test]
    fn custom_history_path_wins() {
        let path = resolve(Some("/custom/path".into()), Some(PathBuf::from("/home/alice")));
        assert_eq!(path, Some(PathBuf::from("/custom/path")));
    }

    #[test]
    fn empty_value_disables_history() {
        assert_eq!(resolve(Some(String::new()), Some(PathBuf::from("/home/alice"))), None);
    }
}
