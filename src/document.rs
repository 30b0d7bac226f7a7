//! The loaded document: an optional source path and its text.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::classify::{self, Classification, ContentKind};

/// The document being viewed/edited.
///
/// Superseded wholesale by the next load; in-place edits mutate `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Source path, when the content came from a file.
    pub path: Option<PathBuf>,
    /// Full document text.
    pub text: String,
}

impl Document {
    pub fn new(path: Option<PathBuf>, text: String) -> Self {
        Self { path, text }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a document from disk, replacing invalid UTF-8 rather than
    /// failing on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::new(Some(path.to_path_buf()), text))
    }

    /// File name for titles and the recent list ("Untitled" when the
    /// document has no path).
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "Untitled".to_string(), |name| name.to_string_lossy().into_owned())
    }

    pub fn classification(&self) -> Classification {
        classify::classify(self.path.as_deref(), &self.text)
    }

    pub fn content_kind(&self) -> ContentKind {
        classify::content_kind(self.path.as_deref(), &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_file_name() {
        let doc = Document::new(Some(PathBuf::from("/tmp/dir/notes.md")), String::new());
        assert_eq!(doc.display_name(), "notes.md");
    }

    #[test]
    fn test_display_name_without_path() {
        let doc = Document::new(None, "hello".to_string());
        assert_eq!(doc.display_name(), "Untitled");
    }

    #[test]
    fn test_from_path_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Hi").unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.text, "# Hi");
        assert_eq!(doc.path.as_deref(), Some(path.as_path()));
        assert_eq!(doc.classification(), Classification::Markdown);
    }

    #[test]
    fn test_from_path_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, [0x68, 0x69, 0xFF]).unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert!(doc.text.starts_with("hi"));
        assert!(doc.text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_from_path_missing_file_errors() {
        assert!(Document::from_path(Path::new("/no/such/file.md")).is_err());
    }
}
