// Library directory - the fixed folder whose files are offered as tracks

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Default location, relative to the working directory.
pub const DEFAULT_LIBRARY_DIR: &str = "library";

#[derive(Debug, Clone)]
pub struct LibraryDir {
    path: PathBuf,
}

impl LibraryDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File names directly inside the library, sorted by name.
    /// Subdirectories are not descended into or listed.
    pub fn list(&self) -> Result<Vec<String>, walkdir::Error> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        debug!("Listed {} library entries in {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Path the player should load for a listed entry.
    pub fn resolve(&self, entry: &str) -> PathBuf {
        self.path.join(entry)
    }
}

impl Default for LibraryDir {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_DIR)
    }
}
