//! Local filesystem writer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RackError, Result};

use super::FileWriter;

/// Writes through the local filesystem.
///
/// Missing parent directories are created. Content goes to a sibling temp
/// file that is then renamed over the target, so readers never see a
/// half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl FileWriter for FsWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let wrap = |source: std::io::Error| RackError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(wrap)?;
        }

        let temp = temp_path(path);
        fs::write(&temp, content).map_err(wrap)?;
        if let Err(e) = fs::rename(&temp, path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                tracing::warn!("Could not remove {}: {}", temp.display(), cleanup);
            }
            return Err(wrap(e));
        }

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    #[cfg(unix)]
    fn chown(&self, path: &Path, user: &str, group: &str) -> Result<()> {
        let uid = super::accounts::resolve_uid(user)?;
        let gid = super::accounts::resolve_gid(group)?;

        std::os::unix::fs::chown(path, Some(uid), Some(gid)).map_err(|source| {
            RackError::ChownFailed {
                path: path.to_path_buf(),
                user: user.to_string(),
                group: group.to_string(),
                source,
            }
        })?;

        tracing::debug!("Changed owner of {} to {}:{}", path.display(), user, group);
        Ok(())
    }

    #[cfg(not(unix))]
    fn chown(&self, path: &Path, user: &str, group: &str) -> Result<()> {
        Err(RackError::ChownFailed {
            path: path.to_path_buf(),
            user: user.to_string(),
            group: group.to_string(),
            source: std::io::Error::from(std::io::ErrorKind::Unsupported),
        })
    }
}
