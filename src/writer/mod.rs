//! Target file writes.
//!
//! - [`FileWriter`] - the seam the reconciler writes through
//! - [`FsWriter`] - local filesystem implementation
//! - [`accounts`] - user/group name resolution for `chown`

pub mod accounts;
pub mod fs;

pub use fs::FsWriter;

use std::path::Path;

use crate::error::Result;

/// Writes the properties file and fixes its ownership.
///
/// Both operations fail loudly; there is no partial-write recovery.
pub trait FileWriter {
    /// Replace the contents of `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Set the owner and group of `path`.
    fn chown(&self, path: &Path, user: &str, group: &str) -> Result<()>;
}
