//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::syntax::Span;

/// Context provided to per-file rules.
///
/// Gives rules the file identity and a way to render any span back to its
/// original source text.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Original source text covered by `span`.
    ///
    /// Returns an empty string when the span does not fall on character
    /// boundaries inside the file.
    #[must_use]
    pub fn text(&self, span: Span) -> &'a str {
        self.content.get(span.start..span.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(
            Path::new("/work/app/src/user.ts"),
            "",
            Path::new("/work/app"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/user.ts"));
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let ctx = FileContext::new(
            Path::new("/elsewhere/user.ts"),
            "",
            Path::new("/work/app"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("/elsewhere/user.ts"));
    }

    #[test]
    fn renders_span_text() {
        let content = "function load(): string {}";
        let ctx = FileContext::new(
            Path::new("a.ts"),
            content,
            Path::new("."),
        );
        assert_eq!(ctx.text(Span::new(15, 23, 1, 16)), ": string");
        assert_eq!(ctx.text(Span::new(15, 400, 1, 16)), "");
    }
}
