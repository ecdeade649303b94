//! Notes: Obsidian-compatible markdown files written into the vault
//!
//! Produces markdown files with YAML frontmatter and `![[embed]]` links to
//! captured attachments.

pub mod file_ops;
pub mod frontmatter;
pub mod writer;

pub use writer::NoteWriter;
