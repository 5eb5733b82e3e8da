//! Host toolchain verification.

use crate::exec::{self, Runner};
use crate::layout;
use anyhow::{bail, Result};
use std::path::Path;

/// Tools the build shells out to.
const REQUIRED_TOOLS: &[&str] = &["gfortran", "make", "f2py", "python3"];

/// Check that every required tool resolves on PATH and that the
/// binding interface sources are present.
pub fn check(runner: &dyn Runner, root: &Path) -> Result<()> {
    println!("=== Preflight checks ===");

    let mut missing = Vec::new();

    for tool in REQUIRED_TOOLS {
        if exec::which(runner, root, tool).is_none() {
            missing.push(format!("tool: {tool}"));
        }
    }

    for source in layout::BINDING_SOURCES {
        let path = root.join("python").join(source);
        if !path.exists() {
            missing.push(format!("binding source: {}", path.display()));
        }
    }

    if !missing.is_empty() {
        println!("\nPreflight FAILED. Missing:");
        for item in &missing {
            println!("   - {item}");
        }
        println!("\nTip: gfortran and make come from your distribution; f2py ships with numpy.");
        bail!("Missing build prerequisites");
    }

    println!("  Preflight checks PASSED\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{Outcome, ScriptedRunner};

    fn tree_with_binding_sources() -> (tempfile::TempDir, std::path::PathBuf) {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        std::fs::create_dir(root.join("python")).unwrap();
        for source in layout::BINDING_SOURCES {
            std::fs::write(root.join("python").join(source), "").unwrap();
        }
        (tree, root)
    }

    #[test]
    fn test_all_present_passes() {
        let (_tree, root) = tree_with_binding_sources();
        let runner = ScriptedRunner::new(vec![
            Outcome::Stdout("/usr/bin/gfortran\n"),
            Outcome::Stdout("/usr/bin/make\n"),
            Outcome::Stdout("/usr/bin/f2py\n"),
            Outcome::Stdout("/usr/bin/python3\n"),
        ]);
        assert!(check(&runner, &root).is_ok());
    }

    #[test]
    fn test_missing_tool_fails_after_checking_all() {
        let (_tree, root) = tree_with_binding_sources();
        let runner = ScriptedRunner::new(vec![
            Outcome::Fail,
            Outcome::Stdout("/usr/bin/make\n"),
            Outcome::Stdout("/usr/bin/f2py\n"),
            Outcome::Stdout("/usr/bin/python3\n"),
        ]);
        assert!(check(&runner, &root).is_err());
        // Every tool was probed despite the first failure.
        assert_eq!(runner.call_log().len(), REQUIRED_TOOLS.len());
    }

    #[test]
    fn test_missing_binding_source_fails() {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        std::fs::create_dir(root.join("python")).unwrap();

        let runner = ScriptedRunner::new(vec![
            Outcome::Stdout("/usr/bin/gfortran\n"),
            Outcome::Stdout("/usr/bin/make\n"),
            Outcome::Stdout("/usr/bin/f2py\n"),
            Outcome::Stdout("/usr/bin/python3\n"),
        ]);
        assert!(check(&runner, &root).is_err());
    }
}
