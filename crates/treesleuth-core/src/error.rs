//! Error types for the scanner core.
//!
//! Traversal failures are never returned to the caller: they are folded into
//! the tree output as annotated lines. The types here cover the two places
//! where a typed error is still useful:
//! - invalid configuration, rejected before a session starts
//! - dispatch failures, whose `Display` text becomes an `[Error: ...]` line

use std::time::Duration;
use thiserror::Error;

/// Rejected [`ScanConfig`](crate::model::ScanConfig) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_workers must be at least 1")]
    ZeroWorkers,

    #[error("timeout_per_level must be greater than zero")]
    ZeroTimeout,

    #[error("thread_budget must be at least 1")]
    ZeroThreadBudget,
}

/// Failure to obtain the result of one dispatched subdirectory scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The unit did not finish within the per-level deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The worker pool for this level could not be created.
    #[error("failed to start worker pool: {0}")]
    PoolBuild(String),

    /// The worker panicked while scanning.
    #[error("worker panicked: {0}")]
    Panicked(String),

    /// The worker dropped its result channel without answering.
    #[error("worker exited without a result")]
    Disconnected,
}

impl DispatchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
