//! Vault layout: the fixed folder set under the vault root.

use crate::error::{CaptureError, CaptureResult};
use crate::storage::StorageBackend;
use capture_types::Folder;
use std::path::PathBuf;
use std::sync::Arc;

pub struct VaultLayout {
    root: PathBuf,
    storage: Arc<dyn StorageBackend>,
}

impl VaultLayout {
    /// Open the vault at `root`, creating any missing folders.
    /// Fails if a folder cannot be created; the vault is unusable without them.
    pub fn open(root: impl Into<PathBuf>, storage: Arc<dyn StorageBackend>) -> CaptureResult<Self> {
        let vault = Self {
            root: root.into(),
            storage,
        };
        vault.ensure_layout()?;
        Ok(vault)
    }

    /// Create each folder of the fixed set if absent (idempotent)
    pub fn ensure_layout(&self) -> CaptureResult<()> {
        for folder in Folder::ALL {
            let path = self.folder_path(folder);
            if self.storage.directory_exists(&path) {
                continue;
            }
            self.storage
                .create_directory(&path)
                .map_err(|source| CaptureError::Layout {
                    path: path.clone(),
                    source,
                })?;
            log::debug!("[VAULT] Created folder {:?}", path);
        }
        Ok(())
    }

    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }

    pub fn folder_path(&self, folder: Folder) -> PathBuf {
        self.root.join(folder.dir_name())
    }

    /// Full path for a file in a folder. Pure composition, no storage access.
    pub fn resolve(&self, folder: Folder, filename: &str) -> PathBuf {
        self.folder_path(folder).join(filename)
    }

    pub fn default_text_folder(&self) -> Folder {
        Folder::Inbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsStorage;
    use crate::storage::memory::MemoryStorage;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_all_folders() {
        let dir = tempdir().unwrap();
        let vault = VaultLayout::open(dir.path(), Arc::new(FsStorage::new())).unwrap();

        for folder in Folder::ALL {
            assert!(vault.folder_path(folder).is_dir(), "missing {}", folder);
        }
        assert!(dir.path().join("attachments").is_dir());
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let vault = VaultLayout::open("/vault", storage.clone()).unwrap();
        assert_eq!(storage.mkdir_calls(), Folder::ALL.len());

        vault.ensure_layout().unwrap();
        assert_eq!(storage.mkdir_calls(), Folder::ALL.len());
    }

    #[test]
    fn test_open_fails_when_mkdir_fails() {
        let storage = Arc::new(MemoryStorage::failing_mkdir());
        let result = VaultLayout::open("/vault", storage.clone());

        match result {
            Err(CaptureError::Layout { path, .. }) => {
                assert_eq!(path, PathBuf::from("/vault/inbox"));
            }
            _ => panic!("expected layout error"),
        }
        // Fails fast on the first folder
        assert_eq!(storage.mkdir_calls(), 1);
    }

    #[test]
    fn test_resolve() {
        let vault = VaultLayout::open("/vault", Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(
            vault.resolve(Folder::Bookmarks, "Example.md"),
            PathBuf::from("/vault/bookmarks/Example.md")
        );
        assert_eq!(vault.default_text_folder(), Folder::Inbox);
    }
}
