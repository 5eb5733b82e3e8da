//! Staging cleanup.
//!
//! Only the staging directory is removed. The native `build/` tree
//! holds `Makefile` and `make.depends` that the Fortran build needs,
//! and `lib/` holds build output owned by make; neither is touched.

use crate::layout::Layout;
use anyhow::{Context, Result};

pub fn clean(layout: &Layout) -> Result<()> {
    let staging = layout.staging_dir();
    if staging.exists() {
        std::fs::remove_dir_all(&staging)
            .with_context(|| format!("Failed to remove {}", staging.display()))?;
        println!("  Removed {}", staging.display());
    } else {
        println!("  Nothing to clean");
    }
    Ok(())
}
