//! Rendering and writing finished reports.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use treesleuth_core::model::{ScanConfig, ScanReport};
use treesleuth_core::report;

/// Report encodings the CLI can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub fn render(report: &ScanReport, config: &ScanConfig, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(report::render_text(report)),
        ReportFormat::Json => {
            report::render_json(report, config).context("failed to serialise report as JSON")
        }
    }
}

/// Write the rendered report to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    report: &ScanReport,
    config: &ScanConfig,
    format: ReportFormat,
) -> Result<()> {
    let contents = render(report, config, format)?;
    fs::write(path, contents)
        .with_context(|| format!("Error writing to file {}", path.display()))
}
