//! The result of a completed (possibly partial) scan.

use crate::model::SecurityFinding;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a driver receives from [`ScanSession::run`](crate::scanner::ScanSession::run).
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Directory the scan started from.
    pub root: PathBuf,
    /// Rendered tree, root line first, in depth-first sorted order.
    pub lines: Vec<String>,
    /// Directories whose children were listed, including the root.
    pub total_directories: u64,
    /// Child entries classified across all directories.
    pub entries_processed: u64,
    /// Security findings in discovery order.
    pub findings: Vec<SecurityFinding>,
    /// A dispatched subtree exceeded the per-level deadline and aborted the scan.
    pub timed_out: bool,
    /// The scan was cancelled through a [`ScanHandle`](crate::scanner::ScanHandle).
    pub cancelled: bool,
    pub duration: Duration,
}

impl ScanReport {
    /// The tree lines joined with `\n`, without a trailing newline.
    pub fn tree_text(&self) -> String {
        self.lines.join("\n")
    }

    /// `true` if the tree may be missing entries because the scan stopped early.
    pub fn is_partial(&self) -> bool {
        self.timed_out || self.cancelled
    }
}
