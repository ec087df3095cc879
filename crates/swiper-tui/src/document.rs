//! The single open document: a file read into memory as lines.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use anyhow::Context;
use swiper_core::Document;

#[derive(Debug, Clone)]
pub struct TextDocument {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl TextDocument {
    /// Read `path`, replacing invalid UTF-8 and stripping line terminators.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let mut doc = Self::from_text(&String::from_utf8_lossy(&bytes));
        doc.path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), lines = doc.lines.len(), "document loaded");
        Ok(doc)
    }

    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect::<Vec<_>>();
        // A trailing newline ends the last line rather than starting a new one.
        let lines = match lines.split_last() {
            Some((last, rest)) if last.is_empty() && !rest.is_empty() => rest.to_vec(),
            _ => lines,
        };
        Self { path: None, lines }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for the status bar.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[scratch]".to_string())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.lines.line_text(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let doc = TextDocument::from_text("a\nb\n");
        assert_eq!(doc.lines(), ["a", "b"]);
    }

    #[test]
    fn crlf_is_stripped() {
        let doc = TextDocument::from_text("a\r\nb");
        assert_eq!(doc.line_text(0), "a");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let doc = TextDocument::from_text("");
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn open_reads_lossy_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xffbad\n").unwrap();
        let doc = TextDocument::open(file.path()).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_text(1), "\u{fffd}bad");
        assert!(doc.path().is_some());
    }

    #[test]
    fn open_missing_file_is_an_error() {
        assert!(TextDocument::open(Path::new("/definitely/not/here.txt")).is_err());
    }
}
