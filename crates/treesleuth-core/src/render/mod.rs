//! Tree rendering: glyph sets and line formatting.
//!
//! The renderer is pure string assembly. Choosing between the Unicode and
//! ASCII glyph sets is a console-capability question answered elsewhere
//! (see [`crate::platform::console`]); the renderer uses whichever set it
//! is handed.

pub mod glyphs;

pub use glyphs::{GlyphSet, Glyphs};

use std::fmt;

/// Inline annotation emitted in place of a subtree that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The subtree exceeded the per-level deadline.
    Timeout,
    /// Any other dispatch or execution failure.
    Error(String),
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("[Scan timeout]"),
            Self::Error(message) => write!(f, "[Error: {message}]"),
        }
    }
}

/// Formats tree lines with a fixed glyph set.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer {
    glyphs: &'static Glyphs,
}

impl TreeRenderer {
    pub fn new(set: GlyphSet) -> Self {
        Self {
            glyphs: set.glyphs(),
        }
    }

    /// The connector for an entry: `last` for the final sibling, `branch` otherwise.
    #[inline]
    pub fn connector(&self, is_last: bool) -> &'static str {
        if is_last {
            self.glyphs.last
        } else {
            self.glyphs.branch
        }
    }

    /// Suffix appended to `prefix` for the children of an entry.
    #[inline]
    pub fn extension(&self, is_last: bool) -> &'static str {
        if is_last {
            self.glyphs.space
        } else {
            self.glyphs.vertical
        }
    }

    /// `prefix + connector + label`.
    pub fn line(&self, prefix: &str, is_last: bool, label: &str) -> String {
        let connector = self.connector(is_last);
        let mut line = String::with_capacity(prefix.len() + connector.len() + label.len());
        line.push_str(prefix);
        line.push_str(connector);
        line.push_str(label);
        line
    }

    /// Prefix passed to the recursive scan of an entry's children.
    pub fn child_prefix(&self, prefix: &str, is_last: bool) -> String {
        let mut child = String::with_capacity(prefix.len() + 8);
        child.push_str(prefix);
        child.push_str(self.extension(is_last));
        child
    }

    /// An annotation drawn as the last child under `child_prefix`.
    pub fn annotation_line(&self, child_prefix: &str, annotation: &Annotation) -> String {
        format!("{child_prefix}{}{annotation}", self.glyphs.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_lines() {
        let r = TreeRenderer::new(GlyphSet::Unicode);
        assert_eq!(r.line("", false, "a/"), "├─ a/");
        assert_eq!(r.line("│  ", true, "z/"), "│  └─ z/");
    }

    #[test]
    fn test_ascii_lines() {
        let r = TreeRenderer::new(GlyphSet::Ascii);
        assert_eq!(r.line("", false, "a/"), "+--a/");
        assert_eq!(r.line("|  ", true, "z/"), "|  \\--z/");
    }

    #[test]
    fn test_child_prefix_uses_space_after_last() {
        let r = TreeRenderer::new(GlyphSet::Unicode);
        assert_eq!(r.child_prefix("", true), "   ");
        assert_eq!(r.child_prefix("   ", false), "   │  ");
    }

    #[test]
    fn test_annotation_lines() {
        let r = TreeRenderer::new(GlyphSet::Ascii);
        assert_eq!(
            r.annotation_line("|  ", &Annotation::Timeout),
            "|  \\--[Scan timeout]"
        );
        assert_eq!(
            r.annotation_line("", &Annotation::Error("denied".into())),
            "\\--[Error: denied]"
        );
    }
}
