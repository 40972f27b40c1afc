//! Filesystem access used by the report loader.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Abstraction over the filesystem operations the loader needs.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// List the entries directly inside `dir` that are plain files.
    ///
    /// Subdirectories are neither returned nor descended into.
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Read the file at `path` into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`FileSystem`] implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new standard filesystem handle.
    pub fn new() -> Self {
        StdFileSystem
    }
}

impl FileSystem for StdFileSystem {
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}
