//! Local filesystem storage

use super::StorageBackend;
use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Storage backed by the local filesystem (tokio::fs for writes)
#[derive(Debug, Clone, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBackend for FsStorage {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    async fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        tokio::fs::write(path, content.as_bytes()).await
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, bytes).await
    }
}
