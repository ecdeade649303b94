//! Storage backend seam
//!
//! The vault and note writer only ever talk to storage through this trait, so
//! the filesystem can be swapped for an in-memory double in tests.

mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsStorage;

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Capability set the capture pipeline needs from durable storage.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn directory_exists(&self, path: &Path) -> bool;

    /// Create a directory (and any missing parents)
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Used to flag notes that are about to be replaced
    fn file_exists(&self, path: &Path) -> bool;

    /// Write UTF-8 text, replacing any existing file
    async fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Write raw bytes, replacing any existing file
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}
