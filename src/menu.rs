//! Interactive launch menu.
//!
//! Prints the option registry, reads one selection from standard input
//! and validates it down to the absolute root directory of the server
//! session. Every rejection is reported with a user-facing message and
//! ends the launch flow; nothing is retried.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::registry::Registry;

/// Why a launch selection was rejected.
///
/// The display text of each variant is exactly what the user sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Input did not parse as an integer.
    #[error("Invalid input. Please enter a number.")]
    InvalidInput,
    /// Parsed integer has no registry entry.
    #[error("Invalid choice. Please select a valid option.")]
    UnknownOption,
    /// The registered path is not an existing directory.
    #[error("Invalid directory. The path does not exist.")]
    DirectoryNotFound,
}

/// Print the option menu.
pub fn print_menu(registry: &Registry) {
    println!("=== Static File Server Launcher ===");
    println!("Choose a server to run:");
    for (key, path) in registry.entries() {
        println!("{key}. {path}");
    }
    println!("===================================");
}

/// Read one line and parse it as an integer selection.
///
/// Parsed as `i64` so that negative input still reaches the registry
/// lookup (and fails there) instead of being reported as a parse error.
pub fn read_selection(reader: &mut impl BufRead) -> Result<i64, SelectionError> {
    print!("Select server: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|_| SelectionError::InvalidInput)?;

    line.trim()
        .parse()
        .map_err(|_| SelectionError::InvalidInput)
}

/// Look the selection up in the registry.
pub fn lookup(registry: &Registry, choice: i64) -> Result<&str, SelectionError> {
    u32::try_from(choice)
        .ok()
        .and_then(|key| registry.resolve(key))
        .ok_or(SelectionError::UnknownOption)
}

/// Resolve a registered path to an existing absolute directory.
///
/// Relative paths resolve against the current working directory at
/// invocation time, matching how the registry paths are written.
pub fn checked_root(path: impl AsRef<Path>) -> Result<PathBuf, SelectionError> {
    let root = fs::canonicalize(path).map_err(|_| SelectionError::DirectoryNotFound)?;
    if root.is_dir() {
        Ok(root)
    } else {
        Err(SelectionError::DirectoryNotFound)
    }
}

/// Full selection flow: prompt, parse, look up, validate.
pub fn select_root(
    registry: &Registry,
    reader: &mut impl BufRead,
) -> Result<PathBuf, SelectionError> {
    let choice = read_selection(reader)?;
    let path = lookup(registry, choice)?;
    checked_root(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rejects_non_integer_input() {
        for input in ["abc\n", "\n", "1.5\n", "one\n"] {
            let mut reader = Cursor::new(input);
            assert_eq!(
                read_selection(&mut reader),
                Err(SelectionError::InvalidInput),
                "input {input:?} should not parse"
            );
        }
    }

    #[test]
    fn accepts_integer_input_with_whitespace() {
        let mut reader = Cursor::new("  2 \n");
        assert_eq!(read_selection(&mut reader), Ok(2));
    }

    #[test]
    fn negative_input_parses_but_is_not_an_option() {
        let mut reader = Cursor::new("-1\n");
        let choice = read_selection(&mut reader).unwrap();
        let registry = Registry::builtin();
        assert_eq!(
            lookup(&registry, choice),
            Err(SelectionError::UnknownOption)
        );
    }

    #[test]
    fn unregistered_key_is_unknown_option() {
        let registry = Registry::builtin();
        assert_eq!(lookup(&registry, 99), Err(SelectionError::UnknownOption));
    }

    #[test]
    fn existing_directory_resolves_to_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = checked_root(dir.path()).unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_there");
        assert_eq!(
            checked_root(&missing),
            Err(SelectionError::DirectoryNotFound)
        );
    }

    #[test]
    fn file_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"not a directory").unwrap();
        assert_eq!(checked_root(&file), Err(SelectionError::DirectoryNotFound));
    }

    #[test]
    fn full_flow_selects_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::of(&[(1, dir.path().to_str().unwrap())]);
        let mut reader = Cursor::new("1\n");
        let root = select_root(&registry, &mut reader).unwrap();
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn full_flow_rejects_missing_directory() {
        let registry = Registry::of(&[(1, "definitely/not/a/real/dir")]);
        let mut reader = Cursor::new("1\n");
        assert_eq!(
            select_root(&registry, &mut reader),
            Err(SelectionError::DirectoryNotFound)
        );
    }

    #[test]
    fn rejection_messages_match_the_prompt_contract() {
        assert_eq!(
            SelectionError::InvalidInput.to_string(),
            "Invalid input. Please enter a number."
        );
        assert_eq!(
            SelectionError::UnknownOption.to_string(),
            "Invalid choice. Please select a valid option."
        );
        assert_eq!(
            SelectionError::DirectoryNotFound.to_string(),
            "Invalid directory. The path does not exist."
        );
    }
}
