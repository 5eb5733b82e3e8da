//! The build pipeline: configure, parallel make, binding target,
//! artifact relocation.
//!
//! The sequence is strictly linear and fails on the first non-zero
//! exit. There is no retry logic and no partial-success path; the only
//! guaranteed step is the chdir back to `python/` (see
//! [`crate::workdir`]).

use crate::exec::{self, Invocation, Runner};
use crate::layout::{self, Layout};
use crate::workdir::WorkdirGuard;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Fortran compiler handed to the configure script.
const COMPILER: &str = "gfortran";

/// Optimization profile understood by the configure script.
const OPT_PROFILE: &str = "opt";

/// Parallel make jobs. The upstream build pins 4.
const JOBS_FLAG: &str = "-j4";

const EXT_SUFFIX_QUERY: &str = "import sysconfig; print(sysconfig.get_config_var('EXT_SUFFIX'))";

pub struct BuildConfig {
    /// Path to the oorb source tree.
    pub root: PathBuf,
    /// Staging directory name under `python/`.
    pub build_base: String,
    /// Interpreter to build the binding against; discovered on PATH
    /// when not set.
    pub python: Option<String>,
}

/// Run the whole pipeline. Returns the staged artifact path.
pub fn run(runner: &dyn Runner, cfg: &BuildConfig) -> Result<PathBuf> {
    let root = std::fs::canonicalize(&cfg.root)
        .with_context(|| format!("oorb source tree not found at {}", cfg.root.display()))?;
    let layout = Layout::new(&root, &cfg.build_base);
    let python = interpreter(runner, &root, cfg.python.as_deref())?;

    println!("=== Building {} ===", layout::EXTENSION_NAME);
    {
        let _guard = WorkdirGuard::enter(&root, &layout.python_dir())?;
        configure(runner, &root, &python)?;
        make(runner, &root, None)?;
        make(runner, &root, Some(layout::EXTENSION_NAME))?;
    }

    let suffix = extension_suffix(runner, &root, &python)?;
    relocate(&layout, &layout::artifact_name(&suffix))
}

fn interpreter(runner: &dyn Runner, root: &Path, override_path: Option<&str>) -> Result<String> {
    if let Some(path) = override_path {
        return Ok(path.to_string());
    }
    exec::which(runner, root, "python3")
        .ok_or_else(|| anyhow::anyhow!("python3 not found on PATH"))
}

fn configure(runner: &dyn Runner, root: &Path, python: &str) -> Result<()> {
    let f2py = exec::which(runner, root, "f2py")
        .ok_or_else(|| anyhow::anyhow!("f2py not found on PATH (ships with numpy)"))?;

    println!("  Configuring with {COMPILER} ({OPT_PROFILE} profile)...");
    let f2py_arg = format!("--with-f2py={f2py}");
    let python_arg = format!("--with-python={python}");
    runner.run(&Invocation::new(
        "./configure",
        &[COMPILER, OPT_PROFILE, "--with-pyoorb", &f2py_arg, &python_arg],
        root,
    ))
}

fn make(runner: &dyn Runner, root: &Path, target: Option<&str>) -> Result<()> {
    let mut args = Vec::new();
    if let Some(target) = target {
        println!("  Building {target} with 4 jobs...");
        args.push(target);
    } else {
        println!("  Building with 4 jobs...");
    }
    args.push(JOBS_FLAG);
    runner.run(&Invocation::new("make", &args, root))
}

/// Ask the interpreter for its native extension suffix, e.g.
/// `.cpython-312-x86_64-linux-gnu.so`.
fn extension_suffix(runner: &dyn Runner, root: &Path, python: &str) -> Result<String> {
    let out = runner.capture(&Invocation::new(python, &["-c", EXT_SUFFIX_QUERY], root))?;
    let suffix = out.trim().to_string();
    if suffix.is_empty() || suffix == "None" {
        bail!("{python} reported no extension suffix");
    }
    Ok(suffix)
}

/// Copy the compiled extension from `lib/` into the staging tree. A
/// missing source file surfaces here as the filesystem's own error;
/// the build steps are trusted to have produced it.
fn relocate(layout: &Layout, file_name: &str) -> Result<PathBuf> {
    let src = layout.artifact_source(file_name);
    let dest = layout.artifact_dest(file_name);

    let dest_dir = layout.staging_lib_dir();
    std::fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;
    std::fs::copy(&src, &dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;

    println!("  Staged: {}", dest.display());
    Ok(dest)
}
