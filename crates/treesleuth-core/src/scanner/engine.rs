//! The recursive, depth/timeout-bounded directory scanner.
//!
//! One call of [`ScanEngine::scan`] handles one directory:
//!
//! 1. Bail out on the stop flag or when the directory is beyond `max_depth`.
//! 2. List, filter hidden entries, sort by name. A failed listing is an
//!    empty subtree, never an error.
//! 3. Classify every child (symlink policy first, then directory/file).
//! 4. Dispatch every subdirectory to this level's [`LevelPool`] up front.
//! 5. Walk the children in sorted order, emitting each line and then, for
//!    directories, waiting on that child's unit with the per-level deadline.
//!
//! Step 5 is strictly sequential, so the output order is the sorted
//! depth-first order no matter which units finish first. Security findings
//! travel back with the lines of their subtree and are merged the same way.
//!
//! # Failure policy
//!
//! - Timeout: one `[Scan timeout]` line under the child, then the global stop
//!   flag is raised. The first stall anywhere ends the whole scan.
//! - Any other dispatch failure: one `[Error: ...]` line, scan continues.

use crate::error::DispatchError;
use crate::model::{DirEntryDecision, EntryKind, ScanConfig, SecurityFinding};
use crate::platform::{FileSystem, FsEntry, FsEntryType};
use crate::render::{Annotation, TreeRenderer};
use crate::scanner::pool::{LevelPool, PendingUnit};
use crate::scanner::progress::SessionState;
use crate::security;
use compact_str::CompactString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Canonical paths from the scan root down to the directory being scanned.
///
/// Only tracked while following symlinks: a followed link whose target is on
/// this chain would recurse forever.
#[derive(Debug)]
pub(crate) struct Lineage {
    path: PathBuf,
    parent: Option<Arc<Lineage>>,
}

impl Lineage {
    pub(crate) fn root(path: PathBuf) -> Arc<Self> {
        Arc::new(Self { path, parent: None })
    }

    fn child(self: &Arc<Self>, path: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            path,
            parent: Some(Arc::clone(self)),
        })
    }

    fn contains(&self, path: &Path) -> bool {
        let mut node = Some(self);
        while let Some(n) = node {
            if n.path == path {
                return true;
            }
            node = n.parent.as_deref();
        }
        false
    }
}

/// The rendered lines and security findings of one directory's subtree,
/// both in depth-first order.
#[derive(Debug, Default)]
pub(crate) struct Subtree {
    pub(crate) lines: Vec<String>,
    pub(crate) findings: Vec<SecurityFinding>,
}

type PendingSubtree = Result<PendingUnit<Subtree>, DispatchError>;

/// The in-flight children of one directory.
///
/// Holds the level pool, and with it the thread lease, until the parent has
/// collected every unit or returned early.
struct Dispatched {
    _pool: Option<LevelPool>,
    units: std::vec::IntoIter<PendingSubtree>,
}

impl Dispatched {
    fn none() -> Self {
        Self {
            _pool: None,
            units: Vec::new().into_iter(),
        }
    }
}

/// Everything a recursive call needs, shared by all workers of a session.
pub(crate) struct ScanEngine {
    pub(crate) config: ScanConfig,
    pub(crate) renderer: TreeRenderer,
    pub(crate) state: Arc<SessionState>,
    pub(crate) fs: Arc<dyn FileSystem>,
}

impl ScanEngine {
    pub(crate) fn new(config: ScanConfig, fs: Arc<dyn FileSystem>) -> Self {
        let renderer = TreeRenderer::new(config.glyph_set);
        let state = Arc::new(SessionState::new(config.thread_budget));
        Self {
            config,
            renderer,
            state,
            fs,
        }
    }

    /// Loop-detection chain for the scan root, when symlinks are followed.
    pub(crate) fn root_lineage(&self, root: &Path) -> Option<Arc<Lineage>> {
        if !self.config.follow_symlinks {
            return None;
        }
        match self.fs.resolve(root) {
            Ok(canonical) => Some(Lineage::root(canonical)),
            Err(err) => {
                debug!("Cannot canonicalise root {}: {err}", root.display());
                None
            }
        }
    }

    /// Scan `path` at `depth`, returning its rendered subtree (without the
    /// line for `path` itself).
    pub(crate) fn scan(
        self: &Arc<Self>,
        path: &Path,
        depth: usize,
        prefix: &str,
        lineage: Option<Arc<Lineage>>,
    ) -> Subtree {
        if self.state.should_stop() || self.config.depth_exceeded(depth) {
            return Subtree::default();
        }

        let mut entries = match self.fs.read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("Skipping {}: {err}", path.display());
                return Subtree::default();
            }
        };
        if !self.config.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        // A unit abandoned after a timeout may only get here once the scan
        // has stopped; it must not move the counters.
        if self.state.should_stop() {
            return Subtree::default();
        }
        self.state.record_directory();

        let count = entries.len();
        let decisions: Vec<DirEntryDecision> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| self.classify(entry, i + 1 == count, lineage.as_deref()))
            .collect();

        let mut children = self.dispatch_children(&decisions, depth, prefix, lineage.as_ref());

        let mut tree = Subtree {
            lines: Vec::with_capacity(count),
            findings: Vec::new(),
        };
        for decision in &decisions {
            if self.state.should_stop() {
                return tree;
            }

            if let Some(label) = decision.label() {
                if decision.is_directory() && self.config.show_security {
                    if let Some(finding) = self.check_security(decision) {
                        tree.findings.push(finding);
                    }
                }
                tree.lines.push(self.renderer.line(prefix, decision.is_last, &label));
            }

            if decision.is_directory() {
                if let Some(pending) = children.units.next() {
                    let child_prefix = self.renderer.child_prefix(prefix, decision.is_last);
                    self.collect(pending, &decision.target, &child_prefix, &mut tree);
                }
            }

            // Symlinks reported by tag are not counted as processed entries.
            if decision.kind.annotation().is_none() {
                self.state.record_entry();
            }
        }

        tree
    }

    /// Decide how one child is rendered and whether it is descended into.
    fn classify(
        &self,
        entry: &FsEntry,
        is_last: bool,
        lineage: Option<&Lineage>,
    ) -> DirEntryDecision {
        let mut decision = DirEntryDecision {
            name: CompactString::new(entry.name_lossy()),
            is_last,
            kind: EntryKind::File,
            depth_prefix_extension: self.renderer.extension(is_last),
            target: entry.path.clone(),
        };

        decision.kind = match entry.file_type {
            FsEntryType::Dir => EntryKind::Directory,
            FsEntryType::File | FsEntryType::Other => EntryKind::File,
            FsEntryType::Symlink if !self.config.follow_symlinks => EntryKind::Symlink,
            FsEntryType::Symlink => match self.fs.resolve(&entry.path) {
                Ok(resolved) if lineage.is_some_and(|l| l.contains(&resolved)) => {
                    debug!(
                        "Symlink loop: {} -> {}",
                        entry.path.display(),
                        resolved.display()
                    );
                    EntryKind::SymlinkLoop
                }
                Ok(resolved) => {
                    let kind = if self.fs.is_dir(&resolved) {
                        EntryKind::Directory
                    } else {
                        EntryKind::File
                    };
                    // A followed link is shown, and descended, as its target.
                    if let Some(target_name) = resolved.file_name() {
                        decision.name = CompactString::new(target_name.to_string_lossy());
                    }
                    decision.target = resolved;
                    kind
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => EntryKind::BrokenSymlink,
                Err(err) => {
                    debug!("Cannot resolve {}: {err}", entry.path.display());
                    EntryKind::UnresolvableSymlink
                }
            },
        };

        decision
    }

    fn check_security(&self, decision: &DirEntryDecision) -> Option<SecurityFinding> {
        let keyword = security::matched_keyword(&decision.name)?;
        debug!("Security keyword {keyword:?} in {}", decision.target.display());
        let finding = SecurityFinding {
            path: decision.target.display().to_string(),
            keyword,
        };
        self.state.record_finding(finding.clone());
        Some(finding)
    }

    /// Canonical form of a directory about to be scanned, for loop detection.
    fn canonical(&self, path: &Path) -> PathBuf {
        self.fs.resolve(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Submit the recursive scan of every subdirectory to a fresh level pool.
    ///
    /// Yields one unit per directory decision, in order. Nothing is yielded
    /// when the children are beyond `max_depth` (their lines are still drawn,
    /// but there is nothing to list) or the scan is stopping.
    fn dispatch_children(
        self: &Arc<Self>,
        decisions: &[DirEntryDecision],
        depth: usize,
        prefix: &str,
        lineage: Option<&Arc<Lineage>>,
    ) -> Dispatched {
        let dirs: Vec<&DirEntryDecision> = decisions.iter().filter(|d| d.is_directory()).collect();
        if dirs.is_empty() || self.config.depth_exceeded(depth + 1) || self.state.should_stop() {
            return Dispatched::none();
        }

        let pool = match LevelPool::build(&self.state.budget, self.config.max_workers, dirs.len()) {
            Ok(pool) => pool,
            Err(err) => {
                warn!("Cannot scan subdirectories of depth {depth}: {err}");
                let failed: Vec<PendingSubtree> = dirs.iter().map(|_| Err(err.clone())).collect();
                return Dispatched {
                    _pool: None,
                    units: failed.into_iter(),
                };
            }
        };

        let units: Vec<PendingSubtree> = dirs
            .into_iter()
            .map(|decision| {
                let engine = Arc::clone(self);
                let target = decision.target.clone();
                let child_prefix = self.renderer.child_prefix(prefix, decision.is_last);
                let parent_lineage = lineage.cloned();
                Ok(pool.dispatch(move || {
                    let lineage = parent_lineage.map(|l| l.child(engine.canonical(&target)));
                    engine.scan(&target, depth + 1, &child_prefix, lineage)
                }))
            })
            .collect();

        Dispatched {
            _pool: Some(pool),
            units: units.into_iter(),
        }
    }

    /// Wait for one child's subtree and append it, or its failure annotation.
    fn collect(
        &self,
        pending: PendingSubtree,
        target: &Path,
        child_prefix: &str,
        tree: &mut Subtree,
    ) {
        match pending.and_then(|unit| unit.wait(self.config.timeout_per_level)) {
            Ok(child) => {
                tree.lines.extend(child.lines);
                tree.findings.extend(child.findings);
            }
            Err(err) if err.is_timeout() => {
                warn!(
                    "Scan of {} exceeded {:?}; stopping",
                    target.display(),
                    self.config.timeout_per_level
                );
                tree.lines
                    .push(self.renderer.annotation_line(child_prefix, &Annotation::Timeout));
                self.state.abort_on_timeout();
            }
            Err(err) => {
                warn!("Scan of {} failed: {err}", target.display());
                tree.lines.push(
                    self.renderer
                        .annotation_line(child_prefix, &Annotation::Error(err.to_string())),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineage_contains_self_and_ancestors() {
        let root = Lineage::root(PathBuf::from("/data"));
        let child = root.child(PathBuf::from("/data/a"));
        let grandchild = child.child(PathBuf::from("/data/a/b"));

        assert!(grandchild.contains(Path::new("/data/a/b")));
        assert!(grandchild.contains(Path::new("/data")));
        assert!(!grandchild.contains(Path::new("/data/c")));
        assert!(!root.contains(Path::new("/data/a")));
    }
}
