//! Context types for rule execution.

use crate::markup::lexer::{lex, Lexed};
use crate::markup::{Markup, MarkupExtractor};
use crate::types::Location;
use std::path::{Path, PathBuf};

/// File extensions the scanner and every rule accept.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

/// Returns true if `path` has one of the [`SUPPORTED_EXTENSIONS`].
#[must_use]
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Converts a byte offset into a 1-based line and 0-based column.
///
/// The line is the number of newlines before `offset` plus one. Every
/// location in a report goes through this function, whichever extractor
/// found the match.
#[must_use]
pub fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = &content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(offset, |nl| offset - nl - 1);
    (line, column)
}

/// Context provided to rules.
///
/// Holds the single text snapshot every rule in a pass observes, plus the
/// markup extracted from it once.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as read for this pass.
    pub content: &'a str,
    /// Path relative to the scanned root.
    pub relative_path: PathBuf,
    /// Lowercase extension without the dot (empty if none).
    pub extension: String,
    /// Class attributes and elements found in the file.
    pub markup: Markup,
    /// String literals and comments of the file.
    pub lexed: Lexed,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context, extracting markup with `extractor`.
    #[must_use]
    pub fn new(
        path: &'a Path,
        content: &'a str,
        root: &Path,
        extractor: &dyn MarkupExtractor,
    ) -> Self {
        let markup = if is_supported_path(path) {
            extractor.extract(path, content)
        } else {
            Markup::default()
        };
        Self::with_markup(path, content, root, markup)
    }

    /// Creates a context from already extracted markup.
    #[must_use]
    pub fn with_markup(path: &'a Path, content: &'a str, root: &Path, markup: Markup) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        Self {
            path,
            content,
            relative_path,
            extension,
            markup,
            lexed: lex(content),
        }
    }

    /// Returns true if rules should look at this file at all.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_EXTENSIONS.contains(&self.extension.as_str())
    }

    /// Returns the 1-based line and 0-based column of a byte offset.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        line_col(self.content, offset)
    }

    /// Builds a location for the span `offset..offset + length`.
    #[must_use]
    pub fn location(&self, offset: usize, length: usize) -> Location {
        let (line, column) = self.line_col(offset);
        Location::new(self.relative_path.clone(), line, column).with_span(offset, length)
    }

    /// Returns the text of the 1-based `line`, without its newline.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1)
            .and_then(|idx| self.content.lines().nth(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::with_markup(
            Path::new("/repo/src/App.tsx"),
            content,
            Path::new("/repo"),
            Markup::default(),
        )
    }

    #[test]
    fn line_col_counts_newlines_before_offset() {
        let content = "line1\nline2\nline3";
        assert_eq!(line_col(content, 0), (1, 0));
        assert_eq!(line_col(content, 6), (2, 0));
        assert_eq!(line_col(content, 8), (2, 2));
        assert_eq!(line_col(content, 12), (3, 0));
    }

    #[test]
    fn line_col_clamps_past_end() {
        assert_eq!(line_col("ab\nc", 99), (2, 1));
    }

    #[test]
    fn supported_extensions() {
        assert!(is_supported_path(Path::new("src/Button.tsx")));
        assert!(is_supported_path(Path::new("src/util.js")));
        assert!(!is_supported_path(Path::new("src/theme.css")));
        assert!(!is_supported_path(Path::new("README.md")));
        assert!(!is_supported_path(Path::new("Makefile")));
    }

    #[test]
    fn relative_path_and_extension() {
        let c = ctx("");
        assert_eq!(c.relative_path, PathBuf::from("src/App.tsx"));
        assert_eq!(c.extension, "tsx");
        assert!(c.is_supported());
    }

    #[test]
    fn location_uses_relative_path() {
        let c = ctx("const a = 1;\nconst b = '#fff';");
        let loc = c.location(24, 4);
        assert_eq!(loc.file, PathBuf::from("src/App.tsx"));
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 11);
        assert_eq!(loc.offset, 24);
        assert_eq!(loc.length, 4);
    }

    #[test]
    fn line_text_is_one_based() {
        let c = ctx("a\nbb\nccc");
        assert_eq!(c.line_text(2), Some("bb"));
        assert_eq!(c.line_text(0), None);
        assert_eq!(c.line_text(9), None);
    }
}
