//! Per-level worker pools with deadline waits.
//!
//! Every directory that has subdirectories to descend into gets its own
//! `rayon` pool for its immediate children. A parent blocks on its children's
//! results, so sharing one pool across levels would let parents starve their
//! own children of threads; a pool per level cannot deadlock that way.
//!
//! # Bounding the pool count
//!
//! One pool per directory means live threads grow with depth × fan-out. The
//! [`ThreadBudget`] caps that: a level takes `min(max_workers, subdirs)`
//! threads from the session-wide budget, never less than one, and returns
//! them when the level finishes. An exhausted budget degrades wide levels to
//! a single thread (sequential siblings) instead of failing.
//!
//! # Results
//!
//! Each dispatched unit answers over its own `bounded(1)` crossbeam channel.
//! The parent waits with `recv_timeout`, so a stuck unit costs at most one
//! deadline. A unit that is abandoned after a timeout keeps running until it
//! observes the stop flag; its late answer is dropped with the channel.

use crate::error::DispatchError;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Session-wide count of pool threads still available.
#[derive(Debug, Clone)]
pub struct ThreadBudget {
    available: Arc<AtomicUsize>,
}

impl ThreadBudget {
    pub fn new(total: usize) -> Self {
        Self {
            available: Arc::new(AtomicUsize::new(total)),
        }
    }

    /// Threads not currently leased.
    pub fn available(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }

    /// Take up to `wanted` threads. Never blocks; may grant zero.
    pub fn lease(&self, wanted: usize) -> ThreadLease {
        let mut granted = 0;
        // The closure always returns `Some`, so the update cannot fail.
        let _ = self
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |available| {
                granted = wanted.min(available);
                Some(available - granted)
            });
        ThreadLease {
            budget: self.clone(),
            granted,
        }
    }
}

/// Threads taken from a [`ThreadBudget`]; returned on drop.
#[derive(Debug)]
pub struct ThreadLease {
    budget: ThreadBudget,
    granted: usize,
}

impl ThreadLease {
    /// Threads actually taken from the budget.
    pub fn granted(&self) -> usize {
        self.granted
    }

    /// Pool size this lease allows. At least one, so a level always progresses.
    pub fn threads(&self) -> usize {
        self.granted.max(1)
    }
}

impl Drop for ThreadLease {
    fn drop(&mut self) {
        if self.granted > 0 {
            self.budget
                .available
                .fetch_add(self.granted, Ordering::AcqRel);
        }
    }
}

/// A bounded pool serving the subdirectories of one directory.
pub struct LevelPool {
    pool: rayon::ThreadPool,
    _lease: ThreadLease,
}

impl LevelPool {
    /// Build a pool for `units` dispatches, capped at `max_workers` threads
    /// and by what the budget has left.
    pub fn build(
        budget: &ThreadBudget,
        max_workers: usize,
        units: usize,
    ) -> Result<Self, DispatchError> {
        let lease = budget.lease(max_workers.min(units).max(1));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(lease.threads())
            .thread_name(|i| format!("treesleuth-scan-{i}"))
            .build()
            .map_err(|err| DispatchError::PoolBuild(err.to_string()))?;
        debug!(
            "Level pool: {} threads for {units} units ({} left in budget)",
            lease.threads(),
            budget.available()
        );
        Ok(Self {
            pool,
            _lease: lease,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queue `job` on this pool and return a handle to wait on its result.
    pub fn dispatch<F, T>(&self, job: F) -> PendingUnit<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.pool.spawn(move || {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(job)).map_err(|p| panic_message(&*p));
            // Nobody is listening once the parent has timed out.
            let _ = tx.send(outcome);
        });
        PendingUnit { rx }
    }
}

/// The eventual result of one dispatched unit.
pub struct PendingUnit<T> {
    rx: Receiver<Result<T, String>>,
}

impl<T> PendingUnit<T> {
    /// Block until the unit answers or `deadline` elapses.
    pub fn wait(self, deadline: Duration) -> Result<T, DispatchError> {
        match self.rx.recv_timeout(deadline) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(DispatchError::Panicked(message)),
            Err(RecvTimeoutError::Timeout) => Err(DispatchError::Timeout(deadline)),
            Err(RecvTimeoutError::Disconnected) => Err(DispatchError::Disconnected),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
