//! Best-effort page title lookup for captured URLs.
//!
//! Only the first few KB of the page are read; the `<title>` element is found
//! with a regex, not an HTML parser. Any failure simply means "no title".

use crate::error::{CaptureError, CaptureResult};
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>\s*(.+?)\s*</title>").unwrap());

#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub user_agent: String,
    pub timeout: Duration,
    /// Stop reading the body after this many bytes
    pub max_bytes: usize,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            user_agent: crate::config::defaults::USER_AGENT.to_string(),
            timeout: Duration::from_secs(crate::config::defaults::TITLE_FETCH_TIMEOUT_SECS),
            max_bytes: crate::config::defaults::TITLE_FETCH_MAX_BYTES,
        }
    }
}

/// Fetches page titles with its own configured client
pub struct TitleFetcher {
    client: Client,
    max_bytes: usize,
}

impl TitleFetcher {
    pub fn new(settings: &FetcherSettings) -> CaptureResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CaptureError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(client, settings.max_bytes))
    }

    /// Use an already configured client (timeout and headers are the caller's)
    pub fn with_client(client: Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    /// Fetch and decode the page `<title>`, or `None` on any failure
    pub async fn fetch_title(&self, url: &str) -> Option<String> {
        match self.try_fetch_title(url).await {
            Ok(title) => title,
            Err(e) => {
                log::debug!("[METADATA] Title fetch for {} failed: {}", url, e);
                None
            }
        }
    }

    async fn try_fetch_title(&self, url: &str) -> Result<Option<String>, String> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let mut buf: Vec<u8> = Vec::new();
        while buf.len() < self.max_bytes {
            let Some(chunk) = resp
                .chunk()
                .await
                .map_err(|e| format!("read failed: {}", e))?
            else {
                break;
            };
            buf.extend_from_slice(&chunk);
            buf.truncate(self.max_bytes);

            // Stop reading as soon as the closing tag has arrived
            if let Some(title) = extract_title(&String::from_utf8_lossy(&buf)) {
                return Ok(Some(title));
            }
        }

        Ok(None)
    }
}

/// Find the first `<title>` in an HTML fragment and decode its entities
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let decoded = decode_html_entities(raw);
    let title = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() { None } else { Some(title) }
}

/// Decode named and numeric HTML entities (full HTML5 named table)
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
