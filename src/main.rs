//! TreeSleuth: concurrent directory tree printer.
//!
//! Thin binary entry point. All logic lives in the `treesleuth-core`
//! and `treesleuth-cli` crates.

use clap::Parser;
use treesleuth_cli::CliArgs;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr so they never interleave with the tree on stdout.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("TreeSleuth starting");

    treesleuth_cli::run(args)
}
