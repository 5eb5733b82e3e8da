//! Project version deduction.
//!
//! The oorb tree ships a script that owns versioning; duplicating its
//! logic here would drift, so we run it and take its word.

use crate::exec::{Invocation, Runner};
use anyhow::{bail, Result};
use std::path::Path;

const VERSION_SCRIPT: &str = "./build-tools/compute-version.sh";

/// Deduce the project version: run the version script, capture stdout,
/// trim surrounding whitespace. Non-zero exit is fatal.
pub fn deduce(runner: &dyn Runner, root: &Path) -> Result<String> {
    let stdout = runner.capture(&Invocation::new(VERSION_SCRIPT, &["-u"], root))?;
    let version = stdout.trim().to_string();
    if version.is_empty() {
        bail!("{VERSION_SCRIPT} printed no version");
    }
    Ok(version)
}
