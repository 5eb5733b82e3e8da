//! External process invocation.
//!
//! Every external tool the orchestrator touches (configure script,
//! make, version script, interpreter) goes through the [`Runner`]
//! trait, so tests can script invocations without launching anything.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A single external command: program, arguments, working directory.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str], cwd: &Path) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Command line as shown in status and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

pub trait Runner {
    /// Run with inherited stdio. Ok only on exit status 0.
    fn run(&self, inv: &Invocation) -> Result<()>;

    /// Run capturing stdout. Ok(stdout) only on exit status 0.
    fn capture(&self, inv: &Invocation) -> Result<String>;
}

/// [`Runner`] backed by `std::process::Command`.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, inv: &Invocation) -> Result<()> {
        let status = Command::new(&inv.program)
            .args(&inv.args)
            .current_dir(&inv.cwd)
            .status()
            .with_context(|| format!("Failed to run {}", inv.display()))?;

        if !status.success() {
            bail!("{} failed with {}", inv.display(), status);
        }
        Ok(())
    }

    fn capture(&self, inv: &Invocation) -> Result<String> {
        let output = Command::new(&inv.program)
            .args(&inv.args)
            .current_dir(&inv.cwd)
            .output()
            .with_context(|| format!("Failed to run {}", inv.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                bail!("{} failed with {}", inv.display(), output.status);
            }
            bail!(
                "{} failed with {}: {}",
                inv.display(),
                output.status,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non-UTF-8 output", inv.display()))
    }
}

/// Resolve a tool on PATH. None if the lookup fails or prints nothing.
pub fn which(runner: &dyn Runner, cwd: &Path, tool: &str) -> Option<String> {
    runner
        .capture(&Invocation::new("which", &[tool], cwd))
        .ok()
        .map(|out| out.trim().to_string())
        .filter(|path| !path.is_empty())
}


#[cfg(test)]
mod tests {
    use super::testing::{Outcome, ScriptedRunner};
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invocation_display() {
        let cwd = PathBuf::from(".");
        let bare = Invocation::new("make", &[], &cwd);
        assert_eq!(bare.display(), "make");

        let with_args = Invocation::new("make", &["pyoorb", "-j4"], &cwd);
        assert_eq!(with_args.display(), "make pyoorb -j4");
    }

    #[test]
    fn test_which_resolves_trimmed_path() {
        let runner = ScriptedRunner::new(vec![Outcome::Stdout("/usr/bin/f2py\n")]);
        let path = which(&runner, Path::new("."), "f2py");
        assert_eq!(path.as_deref(), Some("/usr/bin/f2py"));
        assert_eq!(runner.call_log(), vec!["which f2py"]);
    }

    #[test]
    fn test_which_missing_tool_is_none() {
        let runner = ScriptedRunner::new(vec![Outcome::Fail]);
        assert!(which(&runner, Path::new("."), "f2py").is_none());

        let runner = ScriptedRunner::new(vec![Outcome::Stdout("\n")]);
        assert!(which(&runner, Path::new("."), "f2py").is_none());
    }
}
