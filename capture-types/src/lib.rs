//! Shared types for the capture pipeline: where a capture goes and what it is.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// =====================================================
// Vault folders
// =====================================================

/// Top-level folders of the vault. The lowercase name is the on-disk directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, EnumIter, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Folder {
    Inbox,
    Notes,
    Bookmarks,
    Articles,
    Videos,
    Screenshots,
    Attachments,
}

impl Folder {
    /// Every folder the vault bootstraps, in creation order.
    pub const ALL: [Folder; 7] = [
        Folder::Inbox,
        Folder::Notes,
        Folder::Bookmarks,
        Folder::Articles,
        Folder::Videos,
        Folder::Screenshots,
        Folder::Attachments,
    ];

    /// Directory name under the vault root
    pub fn dir_name(&self) -> &str {
        self.as_ref()
    }
}

// =====================================================
// Content types
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display)]
pub enum ContentType {
    Text,
    Link,
    Article,
    Video,
    /// Screenshots and pasted images; never produced by the classifier
    Image,
}

impl ContentType {
    /// URL-backed content is saved as a link note rather than a text note
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Link | Self::Article | Self::Video)
    }
}

// =====================================================
// Classification
// =====================================================

/// Where a single capture is routed. Produced once per capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub folder: Folder,
    pub content_type: ContentType,
}

impl Classification {
    pub const fn new(folder: Folder, content_type: ContentType) -> Self {
        Self {
            folder,
            content_type,
        }
    }
}
