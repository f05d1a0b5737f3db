//! Immutable scan configuration.

use crate::error::ConfigError;
use crate::render::GlyphSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadline for one dispatched subdirectory scan when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Worker threads per directory level when none is given.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Settings for one scan session. Created once and never mutated while a
/// scan is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Deepest level whose children are listed. `None` scans everything.
    pub max_depth: Option<usize>,
    /// Deadline for each dispatched subdirectory scan.
    pub timeout_per_level: Duration,
    /// Resolve symlinks and descend into directory targets.
    pub follow_symlinks: bool,
    /// Upper bound on concurrently scanned siblings per directory.
    pub max_workers: usize,
    /// Include entries whose name starts with `.`.
    pub show_hidden: bool,
    /// Record directories whose names match a security keyword.
    pub show_security: bool,
    /// Line-drawing characters for the rendered tree.
    pub glyph_set: GlyphSet,
    /// Session-wide soft cap on live worker-pool threads.
    pub thread_budget: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            timeout_per_level: DEFAULT_TIMEOUT,
            follow_symlinks: false,
            max_workers: DEFAULT_MAX_WORKERS,
            show_hidden: false,
            show_security: false,
            glyph_set: GlyphSet::default(),
            thread_budget: default_thread_budget(DEFAULT_MAX_WORKERS),
        }
    }
}

/// Budget large enough that a single wide level always gets `max_workers`
/// threads, with headroom for several levels in flight on larger machines.
pub fn default_thread_budget(max_workers: usize) -> usize {
    max_workers.max(4 * num_cpus::get())
}

impl ScanConfig {
    /// Check the invariants a session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.timeout_per_level.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.thread_budget == 0 {
            return Err(ConfigError::ZeroThreadBudget);
        }
        Ok(())
    }

    /// `true` when a directory at `depth` must not be listed.
    #[inline]
    pub fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScanConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.timeout_per_level, Duration::from_secs(60));
        assert!(config.thread_budget >= config.max_workers);
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = ScanConfig {
            max_workers: 0,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));

        let config = ScanConfig {
            timeout_per_level: Duration::ZERO,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = ScanConfig {
            thread_budget: 0,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreadBudget));
    }

    #[test]
    fn test_depth_exceeded() {
        let unlimited = ScanConfig::default();
        assert!(!unlimited.depth_exceeded(1_000));

        let limited = ScanConfig {
            max_depth: Some(2),
            ..ScanConfig::default()
        };
        assert!(!limited.depth_exceeded(2));
        assert!(limited.depth_exceeded(3));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ScanConfig {
            max_depth: Some(3),
            glyph_set: GlyphSet::Ascii,
            ..ScanConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"glyph_set\":\"ascii\""));
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
