//! Platform access: the filesystem seam the scanner reads through, and the
//! console probe that picks a glyph set.

pub mod console;
pub mod fs;

pub use console::detect_glyph_set;
pub use fs::{FileSystem, FsEntry, FsEntryType, OsFileSystem, HIDDEN_MARKER};
