//! Data model for a TreeSleuth scan.
//!
//! Configuration is fixed before a session starts; entry decisions are
//! transient per-child values; findings and reports outlive the scan.

pub mod config;
pub mod entry;
pub mod finding;
pub mod scan_report;

pub use config::ScanConfig;
pub use entry::{DirEntryDecision, EntryKind};
pub use finding::SecurityFinding;
pub use scan_report::ScanReport;
