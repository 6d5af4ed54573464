//! Line-oriented text files (todo.txt, done.txt, #goals.txt)

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("The file named {} could not be read", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A required input file, read whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Label used in messages about this file
    pub fn label(&self) -> String {
        self.path.display().to_string()
    }

    /// Reads every line; a missing or unreadable file is an error
    ///
    /// Bytes that are not valid UTF-8 are replaced, never rejected.
    pub fn read_lines(&self) -> Result<Vec<String>, InputError> {
        let bytes = fs::read(&self.path).map_err(|source| InputError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
