//! Command-line arguments.

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;
use treesleuth_core::model::config::default_thread_budget;
use treesleuth_core::model::ScanConfig;
use treesleuth_core::render::GlyphSet;

/// Generate a directory tree structure
#[derive(Parser, Debug, Clone)]
#[command(
    name = "treesleuth",
    version,
    about = "Generate a directory tree structure",
    long_about = "Walks a directory tree concurrently and prints it as a tree of directories.\n\n\
                  Each subdirectory scan has a deadline; the first one to miss it stops the\n\
                  whole scan and the partial tree is printed with a [Scan timeout] marker.",
    after_help = "EXAMPLES:\n    \
        treesleuth -o output.txt -d 3 -t 60 -f -w 10 -a\n    \
        treesleuth /srv/share -s --no-pager\n    \
        treesleuth . --json -o tree.json"
)]
pub struct CliArgs {
    /// Directory to scan (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output file to save the tree structure
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum depth to scan (default: unlimited)
    #[arg(short, long, value_name = "DEPTH")]
    pub depth: Option<usize>,

    /// Timeout in seconds for each directory scan
    #[arg(
        short,
        long,
        default_value_t = 60,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Follow symbolic links (default: ignore them)
    #[arg(short = 'f', long)]
    pub follow_symlinks: bool,

    /// Number of worker threads per directory level
    #[arg(
        short = 'w',
        long,
        default_value_t = 10,
        value_name = "NUM",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub workers: usize,

    /// Cap on worker threads across the whole scan (default: scales with CPUs)
    #[arg(
        long,
        value_name = "NUM",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub thread_budget: Option<usize>,

    /// Show hidden directories (default: hide them)
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Show security findings (default: hide them)
    #[arg(short = 's', long = "security")]
    pub security: bool,

    /// Draw the tree with ASCII characters
    #[arg(long)]
    pub ascii: bool,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print to stdout instead of paging through less/more
    #[arg(long)]
    pub no_pager: bool,

    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// The directory to scan: the given path, or the working directory.
    pub fn root(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    pub fn scan_config(&self, glyph_set: GlyphSet) -> ScanConfig {
        ScanConfig {
            max_depth: self.depth,
            timeout_per_level: Duration::from_secs(self.timeout),
            follow_symlinks: self.follow_symlinks,
            max_workers: self.workers,
            show_hidden: self.all,
            show_security: self.security,
            glyph_set,
            thread_budget: self
                .thread_budget
                .unwrap_or_else(|| default_thread_budget(self.workers)),
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["treesleuth"]).unwrap();
        assert_eq!(args.path, None);
        assert_eq!(args.timeout, 60);
        assert_eq!(args.workers, 10);
        assert!(!args.follow_symlinks && !args.all && !args.security);
        assert_eq!(args.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_short_flags() {
        let args = CliArgs::try_parse_from([
            "treesleuth", "-o", "out.txt", "-d", "3", "-t", "5", "-f", "--workers", "4", "-a",
            "-s", "-vv",
        ])
        .unwrap();
        let config = args.scan_config(GlyphSet::Ascii);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.timeout_per_level, Duration::from_secs(5));
        assert!(config.follow_symlinks && config.show_hidden && config.show_security);
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.glyph_set, GlyphSet::Ascii);
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_workers_short_and_long_forms() {
        let short = CliArgs::try_parse_from(["treesleuth", "-w", "4"]).unwrap();
        let long = CliArgs::try_parse_from(["treesleuth", "--workers", "4"]).unwrap();
        assert_eq!(short.workers, 4);
        assert_eq!(long.workers, 4);
        assert!(CliArgs::try_parse_from(["treesleuth", "-w", "0"]).is_err());
    }

    #[test]
    fn test_zero_workers_and_timeout_rejected() {
        assert!(CliArgs::try_parse_from(["treesleuth", "--workers", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["treesleuth", "-t", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["treesleuth", "--thread-budget", "0"]).is_err());
    }

    #[test]
    fn test_root_defaults_to_cwd() {
        let args = CliArgs::try_parse_from(["treesleuth"]).unwrap();
        assert_eq!(args.root().unwrap(), std::env::current_dir().unwrap());
    }
}
