//! Per-child classification produced while scanning one directory.
//!
//! A [`DirEntryDecision`] is consumed immediately: it yields at most one
//! rendered line and, for directories, one recursive unit of work.

use compact_str::CompactString;
use std::path::PathBuf;

/// What a child entry turned out to be after symlink handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory (possibly reached through a followed symlink).
    Directory,
    /// A symlink that was not followed.
    Symlink,
    /// A followed symlink whose target does not exist.
    BrokenSymlink,
    /// A followed symlink that could not be resolved at all.
    UnresolvableSymlink,
    /// A followed symlink pointing back at the directory being scanned or an ancestor.
    SymlinkLoop,
    /// Anything else. Classified, then dropped from the tree.
    File,
}

impl EntryKind {
    /// Tag appended after the `name/` label, if any.
    pub fn annotation(self) -> Option<&'static str> {
        match self {
            Self::Symlink => Some("[symlink]"),
            Self::BrokenSymlink => Some("[broken symlink]"),
            Self::UnresolvableSymlink => Some("[unresolvable symlink]"),
            Self::SymlinkLoop => Some("[symlink loop]"),
            Self::Directory | Self::File => None,
        }
    }
}

/// The decision for one child of the directory being scanned.
#[derive(Debug, Clone)]
pub struct DirEntryDecision {
    /// Name shown in the tree. For followed symlinks this is the target's name.
    pub name: CompactString,
    /// Whether this is the final entry of the filtered, sorted listing.
    pub is_last: bool,
    pub kind: EntryKind,
    /// Glyph appended to the current prefix for this entry's children.
    pub depth_prefix_extension: &'static str,
    /// Where a directory's children live (the resolved target for followed links).
    pub target: PathBuf,
}

impl DirEntryDecision {
    /// The rendered label, or `None` for entries that never appear in the tree.
    pub fn label(&self) -> Option<String> {
        match (self.kind, self.kind.annotation()) {
            (EntryKind::File, _) => None,
            (_, Some(tag)) => Some(format!("{}/ {tag}", self.name)),
            (_, None) => Some(format!("{}/", self.name)),
        }
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(kind: EntryKind) -> DirEntryDecision {
        DirEntryDecision {
            name: CompactString::new("link"),
            is_last: false,
            kind,
            depth_prefix_extension: "│  ",
            target: PathBuf::from("/tmp/link"),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(decision(EntryKind::Directory).label().as_deref(), Some("link/"));
        assert_eq!(
            decision(EntryKind::Symlink).label().as_deref(),
            Some("link/ [symlink]")
        );
        assert_eq!(
            decision(EntryKind::BrokenSymlink).label().as_deref(),
            Some("link/ [broken symlink]")
        );
        assert_eq!(
            decision(EntryKind::UnresolvableSymlink).label().as_deref(),
            Some("link/ [unresolvable symlink]")
        );
        assert_eq!(
            decision(EntryKind::SymlinkLoop).label().as_deref(),
            Some("link/ [symlink loop]")
        );
        assert_eq!(decision(EntryKind::File).label(), None);
    }
}
