//! Content loaders for reading game data from files.
//!
//! Each loader has a `load` entry point taking a file path and a `parse`
//! entry point taking the file contents, so embedded data and files on disk
//! go through the same code.

pub mod config;
pub mod map;
pub mod tables;

pub use config::ConfigLoader;
pub use map::{LoadedMap, MapLoader};
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
