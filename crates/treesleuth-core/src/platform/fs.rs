//! Filesystem access used by the scanner.
//!
//! The engine never touches `std::fs` directly. Everything goes through
//! [`FileSystem`] so tests can wrap the real filesystem (for example, to
//! make one directory slow to list) without mocking the whole OS.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Names starting with this character are hidden unless `show_hidden` is set.
pub const HIDDEN_MARKER: char = '.';

/// Entry type as reported by the directory listing, without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEntryType {
    Dir,
    File,
    Symlink,
    /// Sockets, devices, or entries whose type could not be read.
    Other,
}

impl From<fs::FileType> for FsEntryType {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub file_type: FsEntryType,
}

impl FsEntry {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name_lossy().starts_with(HIDDEN_MARKER)
    }
}

/// The filesystem operations the scanner needs.
///
/// Errors are plain `io::Error`s; the scanner decides which ones are silent
/// and which become annotated tree lines.
pub trait FileSystem: Send + Sync {
    /// List the immediate children of `path`, in any order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    /// Resolve `path` through every symlink to a canonical, existing path.
    ///
    /// A missing target must be reported as [`io::ErrorKind::NotFound`].
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;

    /// `true` if `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!("Skipping unreadable entry in {}: {err}", path.display());
                    continue;
                }
            };
            let file_type = entry
                .file_type()
                .map(FsEntryType::from)
                .unwrap_or(FsEntryType::Other);
            entries.push(FsEntry {
                name: entry.file_name(),
                path: entry.path(),
                file_type,
            });
        }
        Ok(entries)
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_reports_types() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("file.txt"), b"x").unwrap();

        let mut entries = OsFileSystem.read_dir(tmp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "file.txt");
        assert_eq!(entries[0].file_type, FsEntryType::File);
        assert_eq!(entries[1].name, "sub");
        assert_eq!(entries[1].file_type, FsEntryType::Dir);
    }

    #[test]
    fn test_read_dir_missing_path_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = OsFileSystem.read_dir(&tmp.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_hidden_entries() {
        let entry = FsEntry {
            name: OsString::from(".git"),
            path: PathBuf::from(".git"),
            file_type: FsEntryType::Dir,
        };
        assert!(entry.is_hidden());
        let entry = FsEntry {
            name: OsString::from("src"),
            ..entry
        };
        assert!(!entry.is_hidden());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_broken_link_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), &link).unwrap();

        let err = OsFileSystem.resolve(&link).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
