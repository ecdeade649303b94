//! NoteWriter: renders captures into vault files
//!
//! Three entry points: plain text notes, screenshot attachments with a
//! companion note, and link notes for URLs. Names are derived from the title
//! or a second-granularity timestamp; two captures landing on the same name
//! overwrite each other (last write wins).

use super::file_ops::{non_blank, note_filename, sanitize_filename, timestamped_name, truncate_chars};
use super::frontmatter::{CREATED_AT_FORMAT, NoteDocument, SOURCE_MANUAL, SOURCE_URL};
use crate::error::{CaptureError, CaptureResult};
use crate::vault::VaultLayout;
use capture_types::Folder;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest stem allowed for link note filenames
pub const MAX_LINK_STEM_CHARS: usize = 50;
pub const UNTITLED_LINK: &str = "Untitled Link";

/// Paths written by [`NoteWriter::save_image`]
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCapture {
    pub image_path: PathBuf,
    pub note_path: PathBuf,
}

pub struct NoteWriter {
    vault: Arc<VaultLayout>,
}

impl NoteWriter {
    pub fn new(vault: Arc<VaultLayout>) -> Self {
        Self { vault }
    }

    /// Save a free-text note (title or timestamp name, vault default folder)
    pub async fn save_text(
        &self,
        content: &str,
        title: Option<&str>,
        target_folder: Option<Folder>,
    ) -> CaptureResult<PathBuf> {
        self.save_text_at(content, title, target_folder, Local::now()).await
    }

    pub async fn save_text_at(
        &self,
        content: &str,
        title: Option<&str>,
        target_folder: Option<Folder>,
        now: DateTime<Local>,
    ) -> CaptureResult<PathBuf> {
        let stem = match non_blank(title) {
            Some(t) => sanitize_filename(t),
            None => sanitize_filename(&timestamped_name("Note", &now)),
        };
        let folder = target_folder.unwrap_or_else(|| self.vault.default_text_folder());
        let path = self.vault.resolve(folder, &note_filename(&stem));

        let mut doc = NoteDocument::captured(SOURCE_MANUAL, &now);
        doc.push_empty_tags();
        let rendered = doc.with_body(content).render();

        self.write_text(&path, &rendered).await?;
        log::info!("[NOTES] Saved text note {:?}", path);
        Ok(path)
    }

    /// Save image bytes as an attachment plus an embedding note in screenshots/
    pub async fn save_image(&self, bytes: &[u8], title: Option<&str>) -> CaptureResult<ImageCapture> {
        self.save_image_at(bytes, title, Local::now()).await
    }

    pub async fn save_image_at(
        &self,
        bytes: &[u8],
        title: Option<&str>,
        now: DateTime<Local>,
    ) -> CaptureResult<ImageCapture> {
        let image_filename = format!("Img_{}.png", now.format("%Y%m%d%H%M%S"));
        let stem = match non_blank(title) {
            Some(t) => sanitize_filename(t),
            None => sanitize_filename(&timestamped_name("Screenshot", &now)),
        };

        let image_path = self.vault.resolve(Folder::Attachments, &image_filename);
        self.write_bytes(&image_path, bytes).await?;

        let note_path = self.vault.resolve(Folder::Screenshots, &note_filename(&stem));
        let body = format!(
            "![[{}]]\n\nCaptured: {}",
            image_filename,
            now.format(CREATED_AT_FORMAT)
        );

        // The attachment stays on disk if the note fails; nothing is rolled back.
        if let Err(e) = self.write_text(&note_path, &body).await {
            log::warn!(
                "[NOTES] Screenshot note failed, attachment {:?} left without a note",
                image_path
            );
            return Err(e);
        }

        log::info!("[NOTES] Saved screenshot {:?} ({} bytes)", note_path, bytes.len());
        Ok(ImageCapture {
            image_path,
            note_path,
        })
    }

    /// Save a link note for `url` into `category`
    pub async fn save_url_note(
        &self,
        url: &str,
        title: Option<&str>,
        category: Folder,
    ) -> CaptureResult<PathBuf> {
        self.save_url_note_at(url, title, category, Local::now()).await
    }

    pub async fn save_url_note_at(
        &self,
        url: &str,
        title: Option<&str>,
        category: Folder,
        now: DateTime<Local>,
    ) -> CaptureResult<PathBuf> {
        let clean_title = non_blank(title).unwrap_or(UNTITLED_LINK);
        let stem = truncate_chars(&sanitize_filename(clean_title), MAX_LINK_STEM_CHARS);
        let path = self.vault.resolve(category, &note_filename(&stem));

        let mut doc = NoteDocument::captured(SOURCE_URL, &now);
        doc.push_quoted("url", url).push_empty_tags();
        let rendered = doc
            .with_body(format!("# [{}]({})\n", clean_title, url))
            .render();

        self.write_text(&path, &rendered).await?;
        log::info!("[NOTES] Saved link note {:?}", path);
        Ok(path)
    }

    async fn write_text(&self, path: &Path, content: &str) -> CaptureResult<()> {
        if self.vault.storage().file_exists(path) {
            log::warn!("[NOTES] Replacing existing note {:?}", path);
        }
        self.vault
            .storage()
            .write_text(path, content)
            .await
            .map_err(|source| CaptureError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> CaptureResult<()> {
        self.vault
            .storage()
            .write_bytes(path, bytes)
            .await
            .map_err(|source| CaptureError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
