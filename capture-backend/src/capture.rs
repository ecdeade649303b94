//! Capture pipeline: classify, enrich URLs with a title, then write the note.

use crate::classifier::Classifier;
use crate::error::CaptureResult;
use crate::metadata::TitleFetcher;
use crate::notes::NoteWriter;
use crate::notes::file_ops::non_blank;
use capture_types::{Classification, ContentType, Folder};
use serde::Serialize;
use std::path::PathBuf;

/// What a single capture produced
#[derive(Debug, Clone, Serialize)]
pub struct CaptureOutcome {
    pub classification: Classification,
    pub path: PathBuf,
    /// Attachment written alongside the note (images only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

pub struct CaptureService {
    classifier: Classifier,
    writer: NoteWriter,
    fetcher: Option<TitleFetcher>,
}

impl CaptureService {
    pub fn new(classifier: Classifier, writer: NoteWriter) -> Self {
        Self {
            classifier,
            writer,
            fetcher: None,
        }
    }

    /// Look up page titles for URLs captured without one (builder pattern)
    pub fn with_title_fetcher(mut self, fetcher: TitleFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Capture text or a URL. A user-supplied title wins over a fetched one.
    pub async fn capture_text(&self, content: &str, title: Option<&str>) -> CaptureResult<CaptureOutcome> {
        let classification = self.classifier.classify(content);
        log::debug!("[CAPTURE] Classified as {:?}", classification);
        let user_title = non_blank(title).map(str::to_string);

        if !classification.content_type.is_url() {
            let path = self
                .writer
                .save_text(content, user_title.as_deref(), Some(classification.folder))
                .await?;
            log::info!(
                "[CAPTURE] {} -> {}",
                classification.content_type,
                classification.folder
            );
            return Ok(CaptureOutcome {
                classification,
                path,
                attachment: None,
                title: user_title,
            });
        }

        // Classified as a URL, so this is a single whitespace-free token
        let url = content.trim();
        let title = match user_title {
            Some(t) => Some(t),
            None => self.lookup_title(url).await,
        };

        let path = self
            .writer
            .save_url_note(url, title.as_deref(), classification.folder)
            .await?;
        log::info!(
            "[CAPTURE] {} {} -> {}",
            classification.content_type,
            url,
            classification.folder
        );

        Ok(CaptureOutcome {
            classification,
            path,
            attachment: None,
            title,
        })
    }

    /// Capture a screenshot / pasted image
    pub async fn capture_image(&self, bytes: &[u8], title: Option<&str>) -> CaptureResult<CaptureOutcome> {
        let image = self.writer.save_image(bytes, title).await?;
        log::info!("[CAPTURE] Image -> {:?}", image.image_path);

        Ok(CaptureOutcome {
            classification: Classification::new(Folder::Screenshots, ContentType::Image),
            path: image.note_path,
            attachment: Some(image.image_path),
            title: non_blank(title).map(str::to_string),
        })
    }

    async fn lookup_title(&self, url: &str) -> Option<String> {
        let fetcher = self.fetcher.as_ref()?;
        let title = fetcher.fetch_title(url).await;
        if title.is_none() {
            log::debug!("[CAPTURE] No title for {}, saving untitled", url);
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FetcherSettings;
    use crate::storage::memory::MemoryStorage;
    use crate::vault::VaultLayout;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn service() -> (CaptureService, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let vault = VaultLayout::open("/vault", storage.clone()).expect("Failed to open vault");
        let writer = NoteWriter::new(Arc::new(vault));
        (CaptureService::new(Classifier::default(), writer), storage)
    }

    #[tokio::test]
    async fn test_capture_plain_text() {
        let (service, storage) = service();

        let outcome = service
            .capture_text("remember the milk", Some("Groceries"))
            .await
            .expect("Failed to capture");

        assert_eq!(outcome.classification.folder, Folder::Notes);
        assert_eq!(outcome.path, PathBuf::from("/vault/notes/Groceries.md"));
        assert!(storage.read_text(&outcome.path).unwrap().contains("source: \"manual\""));
    }

    #[tokio::test]
    async fn test_capture_empty_text_goes_to_inbox() {
        let (service, _) = service();
        let outcome = service.capture_text("   ", None).await.unwrap();
        assert_eq!(outcome.classification.folder, Folder::Inbox);
        assert!(outcome.path.starts_with("/vault/inbox"));
    }

    #[tokio::test]
    async fn test_capture_url_with_user_title() {
        let (service, storage) = service();

        let outcome = service
            .capture_text("https://www.youtube.com/watch?v=abc", Some("Talk"))
            .await
            .unwrap();

        assert_eq!(outcome.classification.content_type, ContentType::Video);
        assert_eq!(outcome.path, PathBuf::from("/vault/videos/Talk.md"));
        let content = storage.read_text(&outcome.path).unwrap();
        assert!(content.contains("url: \"https://www.youtube.com/watch?v=abc\""));
        assert!(content.contains("# [Talk](https://www.youtube.com/watch?v=abc)"));
    }

    #[tokio::test]
    async fn test_capture_multiline_url_paste_is_text_note() {
        let (service, storage) = service();

        let outcome = service
            .capture_text("https://a.com/x\nhttps://b.com/y", Some("Links"))
            .await
            .unwrap();

        assert_eq!(outcome.classification, Classification::new(Folder::Notes, ContentType::Text));
        assert_eq!(outcome.path, PathBuf::from("/vault/notes/Links.md"));
        let content = storage.read_text(&outcome.path).unwrap();
        assert!(!content.contains("url:"));
        assert!(content.ends_with("\n\nhttps://a.com/x\nhttps://b.com/y"));
    }

    #[tokio::test]
    async fn test_capture_url_without_fetcher_is_untitled() {
        let (service, _) = service();
        let outcome = service.capture_text("https://example.com", None).await.unwrap();
        assert_eq!(outcome.path, PathBuf::from("/vault/bookmarks/Untitled Link.md"));
        assert_eq!(outcome.title, None);
    }

    #[tokio::test]
    async fn test_capture_url_fetches_title() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut req = [0u8; 2048];
                let _ = socket.read(&mut req).await;
                let body = "<title>Fetched &amp; Saved</title>";
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        let fetcher = TitleFetcher::new(&FetcherSettings {
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();
        let (service, storage) = service();
        let service = service.with_title_fetcher(fetcher);

        let url = format!("http://{}/a/b/c", addr);
        let outcome = service.capture_text(&url, None).await.unwrap();

        assert_eq!(outcome.classification.folder, Folder::Articles);
        assert_eq!(outcome.title.as_deref(), Some("Fetched & Saved"));
        assert_eq!(outcome.path, PathBuf::from("/vault/articles/Fetched & Saved.md"));
        assert!(storage.read_text(&outcome.path).unwrap().contains(&format!("# [Fetched & Saved]({})", url)));
    }

    #[tokio::test]
    async fn test_capture_image() {
        let (service, storage) = service();
        let outcome = service.capture_image(&[0x89, b'P'], Some("Login bug")).await.unwrap();

        assert_eq!(outcome.classification.content_type, ContentType::Image);
        assert_eq!(outcome.path, PathBuf::from("/vault/screenshots/Login bug.md"));
        let attachment = outcome.attachment.expect("attachment path");
        assert!(attachment.starts_with("/vault/attachments"));
        assert_eq!(storage.read_bytes(&attachment).unwrap(), vec![0x89, b'P']);
    }
}
