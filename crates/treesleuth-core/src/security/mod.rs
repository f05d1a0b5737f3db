//! Security-sensitive directory name detection.
//!
//! A pure, stateless matcher: a directory is flagged when its name contains
//! any of [`SECURITY_KEYWORDS`], ignoring case.

pub mod keywords;

pub use keywords::{matched_keyword, matches, SECURITY_KEYWORDS};
