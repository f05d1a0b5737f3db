//! Scanner module: orchestrates one directory-tree scan.
//!
//! A [`ScanSession`] owns the shared state of a single scan (stop flag,
//! progress counters, security findings) and the engine that walks the
//! tree. Drivers either call [`ScanSession::run`] on the current thread or
//! [`ScanSession::spawn`] it onto a background thread and poll a
//! [`ScanHandle`] for live progress.

pub mod engine;
pub mod pool;
pub mod progress;

use crate::error::ConfigError;
use crate::model::{ScanConfig, ScanReport, SecurityFinding};
use crate::platform::{FileSystem, OsFileSystem};
use engine::ScanEngine;
use progress::{ProgressSnapshot, SessionState};

use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// A configured, not-yet-run scan.
pub struct ScanSession {
    engine: Arc<ScanEngine>,
}

impl ScanSession {
    /// Create a session over the real filesystem.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        Self::with_filesystem(config, Arc::new(OsFileSystem))
    }

    /// Create a session reading through `fs`.
    pub fn with_filesystem(
        config: ScanConfig,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine: Arc::new(ScanEngine::new(config, fs)),
        })
    }

    /// The validated configuration this session scans with.
    pub fn config(&self) -> &ScanConfig {
        &self.engine.config
    }

    /// A handle for progress polling and cancellation from other threads.
    pub fn handle(&self) -> ScanHandle {
        ScanHandle {
            state: Arc::clone(&self.engine.state),
        }
    }

    /// Directories visited so far.
    pub fn snapshot_progress(&self) -> u64 {
        self.engine.state.directories_visited()
    }

    /// Scan `root_path` to completion (or until stopped) on this thread.
    ///
    /// The first line is the root path with a trailing separator; the rest
    /// is the rendered tree. Traversal failures are embedded in the lines,
    /// so this never fails.
    pub fn run(self, root_path: &Path) -> ScanReport {
        let start = Instant::now();
        let engine = &self.engine;
        let state = &engine.state;
        info!(
            "Starting scan of {} (depth {:?}, timeout {:?}, {} workers)",
            root_path.display(),
            engine.config.max_depth,
            engine.config.timeout_per_level,
            engine.config.max_workers
        );

        let mut lines = vec![root_line(root_path)];
        let lineage = engine.root_lineage(root_path);
        let tree = engine.scan(root_path, 0, "", lineage);
        lines.extend(tree.lines);
        state.mark_finished();

        let report = ScanReport {
            root: root_path.to_path_buf(),
            lines,
            total_directories: state.directories_visited(),
            entries_processed: state.entries_processed(),
            findings: tree.findings,
            timed_out: state.timed_out(),
            cancelled: state.is_cancelled(),
            duration: start.elapsed(),
        };

        if report.timed_out {
            warn!("Scan aborted after a per-level timeout; the tree is partial");
        }
        info!(
            "Scan complete: {} directories, {} findings in {:?}",
            report.total_directories,
            report.findings.len(),
            report.duration
        );
        report
    }

    /// Run the scan on a named background thread.
    pub fn spawn(self, root_path: PathBuf) -> io::Result<RunningScan> {
        let handle = self.handle();
        let thread = thread::Builder::new()
            .name("treesleuth-scanner".into())
            .spawn(move || self.run(&root_path))?;
        Ok(RunningScan { handle, thread })
    }
}

/// Cloneable view of a session's shared state.
#[derive(Clone)]
pub struct ScanHandle {
    state: Arc<SessionState>,
}

impl ScanHandle {
    /// Directories visited so far.
    pub fn snapshot_progress(&self) -> u64 {
        self.state.directories_visited()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state.snapshot()
    }

    /// Findings recorded so far, in the order workers reached them. The
    /// final report lists the same findings in tree order.
    pub fn findings_so_far(&self) -> Vec<SecurityFinding> {
        self.state.findings()
    }

    /// Request the scan to stop as soon as possible. Whatever has been
    /// gathered is still returned.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }

    /// `true` once the top-level scan has returned.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

/// A scan running on a background thread.
pub struct RunningScan {
    pub handle: ScanHandle,
    thread: thread::JoinHandle<ScanReport>,
}

impl RunningScan {
    /// Wait for the report. `Err` carries the panic payload if the scan
    /// thread itself panicked.
    pub fn join(self) -> thread::Result<ScanReport> {
        self.thread.join()
    }
}

/// The root path as the first tree line, always ending in a separator.
fn root_line(root: &Path) -> String {
    let mut line = root.display().to_string();
    if !line.ends_with(MAIN_SEPARATOR) {
        line.push(MAIN_SEPARATOR);
    }
    line
}
