//! Report rendering: the plain-text layout written to output files and the
//! JSON export.
//!
//! The text layout is byte-for-byte the historical one, so existing tooling
//! that scrapes the headers keeps working:
//!
//! ```text
//! Total directories found: N
//!
//! POTENTIAL SECURITY FINDINGS        (only when there are findings)
//! =========================
//! - /path/to/secrets
//!
//!
//! DIRECTORY TREE
//! ==============
//! /root/
//! ├─ a/
//! ```

use crate::model::{ScanConfig, ScanReport, SecurityFinding};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;

pub const FINDINGS_HEADER: &str = "POTENTIAL SECURITY FINDINGS";
pub const FINDINGS_RULE: &str = "=========================";
pub const TREE_HEADER: &str = "DIRECTORY TREE";
pub const TREE_RULE: &str = "==============";

/// The findings block, or an empty string when there are none.
pub fn findings_block(findings: &[SecurityFinding]) -> String {
    if findings.is_empty() {
        return String::new();
    }
    let mut out = format!("{FINDINGS_HEADER}\n{FINDINGS_RULE}\n");
    for finding in findings {
        let _ = writeln!(out, "- {}", finding.path);
    }
    out.push_str("\n\n");
    out
}

/// Total count plus the findings block; what a console shows above the tree.
pub fn render_summary(report: &ScanReport) -> String {
    let mut out = format!("Total directories found: {}\n\n", report.total_directories);
    out.push_str(&findings_block(&report.findings));
    out
}

/// The full text report: summary, then the tree block.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = render_summary(report);
    let _ = write!(out, "{TREE_HEADER}\n{TREE_RULE}\n{}", report.tree_text());
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Local>,
    config: &'a ScanConfig,
    #[serde(flatten)]
    report: &'a ScanReport,
}

/// The report and the configuration that produced it, as pretty JSON.
pub fn render_json(report: &ScanReport, config: &ScanConfig) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        generated_at: Local::now(),
        config,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn sample(findings: Vec<SecurityFinding>) -> ScanReport {
        ScanReport {
            root: PathBuf::from("/data"),
            lines: vec!["/data/".into(), "├─ a/".into(), "└─ b/".into()],
            total_directories: 3,
            entries_processed: 4,
            findings,
            timed_out: false,
            cancelled: false,
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_text_without_findings() {
        let text = render_text(&sample(Vec::new()));
        assert_eq!(
            text,
            "Total directories found: 3\n\nDIRECTORY TREE\n==============\n/data/\n├─ a/\n└─ b/"
        );
    }

    #[test]
    fn test_text_with_findings() {
        let text = render_text(&sample(vec![SecurityFinding {
            path: "/data/secrets".into(),
            keyword: "secret",
        }]));
        assert_eq!(
            text,
            "Total directories found: 3\n\n\
             POTENTIAL SECURITY FINDINGS\n=========================\n- /data/secrets\n\n\n\
             DIRECTORY TREE\n==============\n/data/\n├─ a/\n└─ b/"
        );
    }

    #[test]
    fn test_json_contains_report_and_config() {
        let report = sample(Vec::new());
        let json = render_json(&report, &ScanConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_directories"], 3);
        assert_eq!(value["lines"][1], "├─ a/");
        assert_eq!(value["config"]["max_workers"], 10);
        assert!(value["generated_at"].is_string());
    }
}
