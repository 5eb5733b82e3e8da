//! Scoped working-directory handling for the build sequence.
//!
//! The external build runs from the oorb source root; packaging
//! expects to end up in the `python/` subdirectory afterwards, whether
//! the build succeeded or not. The chdir back is a compensating
//! action, not an undo: partial build state stays where it is.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Enters `dir` on construction; on drop, moves the process to
/// `release_to` on every exit path.
pub struct WorkdirGuard {
    release_to: PathBuf,
}

impl WorkdirGuard {
    pub fn enter(dir: &Path, release_to: &Path) -> Result<Self> {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to enter {}", dir.display()))?;
        Ok(Self {
            release_to: release_to.to_path_buf(),
        })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        // Errors cannot propagate from Drop.
        let _ = std::env::set_current_dir(&self.release_to);
    }
}

/// Serializes tests that touch the process-wide current directory.
#[cfg(test)]
pub static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
