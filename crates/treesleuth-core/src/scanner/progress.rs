//! Shared per-session state and the progress snapshots read from it.
//!
//! All recursive workers of one scan mutate a single [`SessionState`]; a
//! display loop on another thread only ever reads it. Counters are atomics
//! and findings sit behind a `parking_lot::Mutex`, so a snapshot never sees
//! a half-applied update.

use crate::model::SecurityFinding;
use crate::scanner::pool::ThreadBudget;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Point-in-time view of a running scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Directories whose children have been listed.
    pub directories_visited: u64,
    /// Child entries handled so far. Symlinks drawn with a tag (`[symlink]`,
    /// `[broken symlink]`, ...) are not counted.
    pub entries_processed: u64,
    /// Security findings recorded so far.
    pub findings: usize,
}

/// State shared by every worker of one scan.
#[derive(Debug)]
pub(crate) struct SessionState {
    /// Cooperative stop signal: no new work once set.
    stop: AtomicBool,
    cancelled: AtomicBool,
    timed_out: AtomicBool,
    /// Set once the top-level scan call has returned.
    finished: AtomicBool,
    directories_visited: AtomicU64,
    entries_processed: AtomicU64,
    /// Findings in the order workers hit them, for live observers. Reports
    /// use the depth-first list returned by the scan instead.
    findings: Mutex<Vec<SecurityFinding>>,
    pub(crate) budget: ThreadBudget,
}

impl SessionState {
    pub(crate) fn new(thread_budget: usize) -> Self {
        Self {
            stop: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            timed_out: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            directories_visited: AtomicU64::new(0),
            entries_processed: AtomicU64::new(0),
            findings: Mutex::new(Vec::new()),
            budget: ThreadBudget::new(thread_budget),
        }
    }

    #[inline]
    pub(crate) fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// External cancellation.
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.stop.store(true, Ordering::Release);
    }

    /// A dispatched unit missed its deadline: stop the whole scan.
    pub(crate) fn abort_on_timeout(&self) {
        self.timed_out.store(true, Ordering::Release);
        self.stop.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn timed_out(&self) -> bool {
        self.timed_out.load(Ordering::Acquire)
    }

    pub(crate) fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn record_directory(&self) {
        self.directories_visited.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_entry(&self) {
        self.entries_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_finding(&self, finding: SecurityFinding) {
        self.findings.lock().push(finding);
    }

    pub(crate) fn directories_visited(&self) -> u64 {
        self.directories_visited.load(Ordering::Relaxed)
    }

    pub(crate) fn entries_processed(&self) -> u64 {
        self.entries_processed.load(Ordering::Relaxed)
    }

    pub(crate) fn findings(&self) -> Vec<SecurityFinding> {
        self.findings.lock().clone()
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            directories_visited: self.directories_visited(),
            entries_processed: self.entries_processed(),
            findings: self.findings.lock().len(),
        }
    }
}
