//! TreeSleuth Core: scanning, rendering, and data model.
//!
//! This crate contains all business logic with zero terminal dependencies.
//! It is designed to be reusable across different frontends (CLI, TUI, tests).
//!
//! # Modules
//!
//! - [`model`]: Scan configuration, entry decisions, findings, and reports.
//! - [`scanner`]: Concurrent, depth/timeout-bounded directory scanning.
//! - [`render`]: Tree glyph sets and line formatting.
//! - [`security`]: Security-sensitive directory name matching.
//! - [`platform`]: Filesystem access seam and console capability probe.
//! - [`report`]: Text and JSON renderings of a finished scan.
//! - [`error`]: Error types shared across the crate.

pub mod error;
pub mod model;
pub mod platform;
pub mod render;
pub mod report;
pub mod scanner;
pub mod security;
