//! The two fixed line-drawing glyph sets.

use serde::{Deserialize, Serialize};

/// Connector and indentation strings for one glyph set.
#[derive(Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Connector for an entry with later siblings.
    pub branch: &'static str,
    /// Connector for the final entry of a directory.
    pub last: &'static str,
    /// Indentation under an entry with later siblings.
    pub vertical: &'static str,
    /// Indentation under a final entry.
    pub space: &'static str,
}

static UNICODE: Glyphs = Glyphs {
    branch: "├─ ",
    last: "└─ ",
    vertical: "│  ",
    space: "   ",
};

// The ASCII connectors have no trailing space; historical output depends on it.
static ASCII: Glyphs = Glyphs {
    branch: "+--",
    last: "\\--",
    vertical: "|  ",
    space: "   ",
};

/// Which glyph set to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    #[default]
    Unicode,
    Ascii,
}

impl GlyphSet {
    pub fn glyphs(self) -> &'static Glyphs {
        match self {
            Self::Unicode => &UNICODE,
            Self::Ascii => &ASCII,
        }
    }
}
