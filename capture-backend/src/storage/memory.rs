//! In-memory storage double with failure injection, used by tests.

use super::StorageBackend;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStorage {
    dirs: Mutex<HashSet<PathBuf>>,
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    mkdir_calls: Mutex<usize>,
    fail_mkdir: bool,
    /// Writes to paths whose string form contains this fragment fail
    fail_writes_matching: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_mkdir() -> Self {
        Self {
            fail_mkdir: true,
            ..Default::default()
        }
    }

    pub fn failing_writes(fragment: &str) -> Self {
        Self {
            fail_writes_matching: Some(fragment.to_string()),
            ..Default::default()
        }
    }

    pub fn mkdir_calls(&self) -> usize {
        *self.mkdir_calls.lock().unwrap()
    }

    pub fn read_text(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    pub fn read_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    fn check_write(&self, path: &Path) -> io::Result<()> {
        if let Some(ref fragment) = self.fail_writes_matching {
            if path.to_string_lossy().contains(fragment.as_str()) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write refused"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn directory_exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        *self.mkdir_calls.lock().unwrap() += 1;
        if self.fail_mkdir {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mkdir refused"));
        }
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        self.check_write(path)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.check_write(path)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
