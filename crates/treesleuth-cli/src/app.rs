//! The `treesleuth` command: scan, show progress, then write or page the result.

use crate::args::CliArgs;
use crate::output::{self, ReportFormat};
use crate::pager;
use crate::progress::{ProgressLine, PROGRESS_INTERVAL};
use anyhow::{anyhow, bail, Context, Result};
use std::io::{self, IsTerminal};
use tracing::{info, warn};
use treesleuth_core::platform::detect_glyph_set;
use treesleuth_core::render::GlyphSet;
use treesleuth_core::report;
use treesleuth_core::scanner::ScanSession;

pub fn run(args: CliArgs) -> Result<()> {
    let root = args.root()?;
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let glyph_set = if args.ascii {
        GlyphSet::Ascii
    } else {
        detect_glyph_set()
    };
    let session =
        ScanSession::new(args.scan_config(glyph_set)).context("invalid scan configuration")?;
    let config = session.config().clone();
    info!(
        "Scanning {} with up to {} workers per level",
        root.display(),
        config.max_workers
    );

    let running = session
        .spawn(root.clone())
        .context("failed to start scanner thread")?;
    let progress = if io::stderr().is_terminal() {
        Some(ProgressLine::start(running.handle.clone(), PROGRESS_INTERVAL)?)
    } else {
        None
    };
    let report = running
        .join()
        .map_err(|_| anyhow!("scanner thread panicked"))?;
    if let Some(progress) = progress {
        progress.finish();
    }

    if report.timed_out {
        warn!("A subdirectory scan timed out; the tree below is partial");
    }
    info!(
        "Scanned {} directories under {}",
        report.total_directories,
        root.display()
    );

    let format = ReportFormat::from_flag(args.json);
    match &args.output {
        Some(path) => {
            output::write_report(path, &report, &config, format)?;
            println!("\nTree structure has been written to {}", path.display());
        }
        None if format == ReportFormat::Json => {
            pager::print_plain(&output::render(&report, &config, format)?)?;
        }
        None => {
            print!("{}", report::render_summary(&report));
            let tree = report.tree_text();
            if args.no_pager || !io::stdout().is_terminal() {
                pager::print_plain(&tree)?;
            } else {
                pager::page(&tree)?;
            }
        }
    }
    Ok(())
}
