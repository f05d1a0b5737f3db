//! Paging long trees through `less`/`more`.
//!
//! `$PAGER` is tried first, then `less`, then `more`. A pager that is not
//! installed is skipped; if none is available the text goes straight to
//! stdout.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

#[cfg(windows)]
const FALLBACK_PAGERS: &[&[&str]] = &[&["cmd", "/C", "more"]];

#[cfg(not(windows))]
const FALLBACK_PAGERS: &[&[&str]] = &[&["less"], &["more"]];

/// Show `text` through the first pager that starts.
pub fn page(text: &str) -> Result<()> {
    let from_env = std::env::var("PAGER").ok();
    let mut candidates: Vec<Vec<&str>> = Vec::new();
    if let Some(pager) = from_env.as_deref() {
        let argv: Vec<&str> = pager.split_whitespace().collect();
        if !argv.is_empty() {
            candidates.push(argv);
        }
    }
    for argv in FALLBACK_PAGERS {
        candidates.push(argv.to_vec());
    }

    for argv in &candidates {
        match run_pager(argv, text) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Pager {:?} not available", argv[0]);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("pager {:?} failed", argv[0]));
            }
        }
    }
    print_plain(text)
}

/// Write `text` to stdout with a trailing newline.
pub fn print_plain(text: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    match writeln!(out, "{text}").and_then(|()| out.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write to stdout"),
    }
}

fn run_pager(argv: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(argv[0])
        .args(&argv[1..])
        .stdin(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        // Quitting the pager early closes the pipe; that is not an error.
        match stdin.write_all(text.as_bytes()) {
            Err(err) if err.kind() != io::ErrorKind::BrokenPipe => return Err(err),
            _ => {}
        }
    }
    child.wait()?;
    Ok(())
}
