//! Content classifier: decides which folder a capture goes to.
//!
//! Text is routed by shape only; URLs run through an ordered list of
//! [`RouteRule`]s where the first matching rule wins. The rules are string and
//! length heuristics, not content inspection.

use capture_types::{Classification, ContentType, Folder};
use url::Url;

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];
const ARTICLE_HOSTS: &[&str] = &["medium.com", "dev.to", "substack.com"];

/// Paths deeper than this many segments look like articles
const ARTICLE_MIN_SEGMENTS: usize = 3;
/// Path + query longer than this looks like an article
const ARTICLE_MAX_SHORT_PATH: usize = 20;

type UrlPredicate = Box<dyn Fn(&Url, &str) -> bool + Send + Sync>;

/// A single URL routing rule: predicate → classification.
///
/// The predicate receives the parsed URL and the lowercased raw input.
pub struct RouteRule {
    pub name: &'static str,
    pub route: Classification,
    predicate: UrlPredicate,
}

impl RouteRule {
    pub fn new<F>(name: &'static str, route: Classification, predicate: F) -> Self
    where
        F: Fn(&Url, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            route,
            predicate: Box::new(predicate),
        }
    }

    pub fn matches(&self, url: &Url, lowered: &str) -> bool {
        (self.predicate)(url, lowered)
    }
}

/// Video hosts take precedence over every article heuristic
fn video_rule() -> RouteRule {
    RouteRule::new(
        "video-host",
        Classification::new(Folder::Videos, ContentType::Video),
        |_, lowered| contains_any(lowered, VIDEO_HOSTS),
    )
}

fn article_rule() -> RouteRule {
    RouteRule::new(
        "article-shape",
        Classification::new(Folder::Articles, ContentType::Article),
        |url, lowered| {
            contains_any(lowered, ARTICLE_HOSTS)
                || path_segment_count(url) >= ARTICLE_MIN_SEGMENTS
                || path_and_query_len(url) > ARTICLE_MAX_SHORT_PATH
        },
    )
}

pub struct Classifier {
    rules: Vec<RouteRule>,
    empty_folder: Folder,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(vec![video_rule(), article_rule()])
    }
}

impl Classifier {
    /// Build a classifier from an ordered rule list. URLs matching no rule
    /// are filed as bookmarks.
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self {
            rules,
            empty_folder: Folder::Inbox,
        }
    }

    /// Folder used for empty / whitespace-only captures (default: inbox)
    pub fn with_empty_folder(mut self, folder: Folder) -> Self {
        self.empty_folder = folder;
        self
    }

    /// Classify raw captured content. Total: never fails.
    pub fn classify(&self, content: &str) -> Classification {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Classification::new(self.empty_folder, ContentType::Text);
        }

        let Some(url) = parse_web_url(trimmed) else {
            return Classification::new(Folder::Notes, ContentType::Text);
        };

        let lowered = trimmed.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&url, &lowered) {
                log::debug!("[CAPTURE] '{}' matched rule {}", trimmed, rule.name);
                return rule.route;
            }
        }

        Classification::new(Folder::Bookmarks, ContentType::Link)
    }
}

/// Parse an absolute http/https URL. The input must be a single token: the
/// URL parser silently strips embedded tabs and newlines, so those are
/// rejected up front.
pub fn parse_web_url(content: &str) -> Option<Url> {
    let content = content.trim();
    if content.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let url = Url::parse(content).ok()?;
    let is_web = matches!(url.scheme(), "http" | "https") && url.host_str().is_some();
    is_web.then_some(url)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn path_segment_count(url: &Url) -> usize {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).count())
        .unwrap_or(0)
}

fn path_and_query_len(url: &Url) -> usize {
    url.path().len() + url.query().map(|q| q.len() + 1).unwrap_or(0)
}
