//! Security findings recorded during a scan.

use serde::Serialize;

/// A directory whose name matched a security keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityFinding {
    /// Full path of the directory as scanned.
    pub path: String,
    /// The keyword that matched.
    pub keyword: &'static str,
}
