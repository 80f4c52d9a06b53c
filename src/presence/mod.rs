//! Dependency presence checks.
//!
//! The reconciler only needs a yes/no answer for one named package; the
//! [`PresenceOracle`] trait is that seam. [`SnapPresence`] answers it by
//! asking snapd.

pub mod snap;

pub use snap::SnapPresence;

use crate::error::Result;

/// Answers whether the managed package is installed.
pub trait PresenceOracle {
    /// Name of the package being checked.
    fn package(&self) -> &str;

    /// Whether the package is installed right now.
    ///
    /// An `Err` means the question could not be answered, not that the
    /// package is missing.
    fn is_present(&self) -> Result<bool>;
}
