//! TreeSleuth CLI: the thin terminal layer around `treesleuth-core`.
//!
//! Argument parsing, the live progress line, paging, and report files live
//! here; everything algorithmic is in the core crate.

pub mod app;
pub mod args;
pub mod output;
pub mod pager;
pub mod progress;

pub use app::run;
pub use args::CliArgs;
