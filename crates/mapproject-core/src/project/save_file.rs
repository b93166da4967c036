//! Atomic file writes
//!
//! Data is written to a temporary file next to the target, synced, and then
//! renamed over the target. Readers see either the old or the new contents,
//! never a partial write.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{ProjectError, Result};

/// A file whose contents only become visible at the target path on commit
///
/// Dropping a `SaveFile` without committing removes the temporary file and
/// leaves the target untouched.
#[derive(Debug)]
pub struct SaveFile {
    target_path: PathBuf,
    temp_path: PathBuf,
    file: File,
    committed: bool,
}

impl SaveFile {
    /// Open a temporary file for writing to `path`
    pub fn create(path: &Path) -> Result<Self> {
        let temp_path = temp_path_for(path);

        let file = File::create(&temp_path).map_err(|e| ProjectError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        Ok(Self {
            target_path: path.to_path_buf(),
            temp_path,
            file,
            committed: false,
        })
    }

    /// Path the contents will be committed to
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Append bytes to the pending contents
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes).map_err(|e| ProjectError::Io {
            operation: "write",
            path: self.temp_path.clone(),
            source: e,
        })
    }

    /// Flush the contents to disk and move them to the target path
    pub fn commit(mut self) -> Result<()> {
        self.file.sync_all().map_err(|e| ProjectError::Io {
            operation: "sync",
            path: self.temp_path.clone(),
            source: e,
        })?;

        fs::rename(&self.temp_path, &self.target_path).map_err(|e| {
            ProjectError::AtomicWriteFailed {
                temp_path: self.temp_path.clone(),
                target_path: self.target_path.clone(),
                source: e,
            }
        })?;

        self.committed = true;
        Ok(())
    }
}

impl Drop for SaveFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        if let Err(e) = fs::remove_file(&self.temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to remove temporary file {}: {e}",
                    self.temp_path.display()
                );
            }
        }
    }
}

/// Temporary file used while writing `path`, in the same directory so the
/// final rename does not cross file systems.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("project"));
    name.push(".tmp");
    path.with_file_name(name)
}
