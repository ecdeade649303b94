//! Generate YAML frontmatter for captured notes.
//!
//! Hand-rolled YAML (no serde_yaml): every field is a single `key: value`
//! line, so an ordered list of pairs is all that is needed.

use chrono::{DateTime, Local};

pub const SOURCE_MANUAL: &str = "manual";
pub const SOURCE_URL: &str = "url";

/// Timestamp format written to `created_at`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A note ready to be written: ordered frontmatter fields + body
#[derive(Debug, Clone, Default)]
pub struct NoteDocument {
    /// (key, already-rendered YAML value), in output order
    pub frontmatter: Vec<(String, String)>,
    pub body: String,
}

impl NoteDocument {
    /// Start a captured note: `created_at` then `source`
    pub fn captured(source: &str, now: &DateTime<Local>) -> Self {
        let mut doc = Self::default();
        doc.push_raw("created_at", now.format(CREATED_AT_FORMAT).to_string());
        doc.push_quoted("source", source);
        doc
    }

    /// Add a field whose value is emitted as-is (lists, timestamps)
    pub fn push_raw(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.frontmatter.push((key.to_string(), value.into()));
        self
    }

    /// Add a double-quoted string field
    pub fn push_quoted(&mut self, key: &str, value: &str) -> &mut Self {
        self.push_raw(key, quote(value))
    }

    /// Add an empty `tags: []` list
    pub fn push_empty_tags(&mut self) -> &mut Self {
        self.push_raw("tags", "[]")
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize: `---` block, blank line, body
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.frontmatter.len() + 3);
        lines.push("---".to_string());
        for (key, value) in &self.frontmatter {
            lines.push(format!("{}: {}", key, value));
        }
        lines.push("---".to_string());
        lines.push(String::new());

        let mut out = lines.join("\n");
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

/// Wrap in double quotes, escaping backslashes and embedded quotes
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Keys of the frontmatter block at the top of `content`, in order
#[cfg(test)]
pub fn frontmatter_keys(content: &str) -> Vec<String> {
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("---") {
        return Vec::new();
    }

    lines
        .take_while(|line| line.trim() != "---")
        .filter_map(|line| line.split_once(':'))
        .map(|(key, _)| key.trim().to_string())
        .collect()
}
