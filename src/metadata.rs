//! Packaging metadata for the pyoorb distribution.
//!
//! Static declarative values plus the deduced version and the README
//! long description, materialized as pretty JSON for the packaging
//! toolchain.

use crate::exec::Runner;
use crate::layout;
use crate::version;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub const PACKAGE_NAME: &str = "pyoorb";
const MAINTAINER: &str = "oorb developers";
const MAINTAINER_EMAIL: &str = "oorb@googlegroups.com";
const AUTHOR: &str = "Mikael Granvik et al.";
const DESCRIPTION: &str =
    "An open-source orbit-computation package for Solar System objects. ";
const URL: &str = "https://github.com/oorb/oorb";
const DOWNLOAD_URL: &str = "https://pypi.python.org/pypi/oorb";
const BUG_TRACKER: &str = "https://github.com/oorb/oorb/issues";
const LICENSE: &str = "GPL3";

/// Runtime requirement of the packaged extension, not of this tool.
const REQUIRES: &[&str] = &["numpy"];

#[derive(Debug, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub maintainer: String,
    pub maintainer_email: String,
    pub author: String,
    pub description: String,
    pub long_description: String,
    pub long_description_content_type: String,
    pub url: String,
    pub download_url: String,
    pub project_urls: ProjectUrls,
    pub license: String,
    pub requires: Vec<String>,
    pub extension: ExtensionSpec,
    pub generated_at: String,
}

/// The compiled extension as declared to the packaging toolchain.
/// Sources and include directory are relative to `python/`.
#[derive(Debug, Serialize)]
pub struct ExtensionSpec {
    pub name: String,
    pub sources: Vec<String>,
    pub include_dirs: Vec<String>,
}

impl ExtensionSpec {
    fn pyoorb() -> Self {
        Self {
            name: layout::EXTENSION_NAME.to_string(),
            sources: layout::BINDING_SOURCES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            include_dirs: vec![format!("../{}", layout::NATIVE_BUILD_DIR)],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectUrls {
    #[serde(rename = "Bug Tracker")]
    pub bug_tracker: String,
    #[serde(rename = "Source Code")]
    pub source_code: String,
}

/// Assemble the metadata. Version deduction runs first; if it fails,
/// nothing is finalized.
pub fn generate(runner: &dyn Runner, root: &Path) -> Result<PackageMetadata> {
    let version = version::deduce(runner, root)?;

    let readme = root.join("python").join("README.md");
    let long_description = std::fs::read_to_string(&readme)
        .with_context(|| format!("Failed to read {}", readme.display()))?;

    Ok(PackageMetadata {
        name: PACKAGE_NAME.to_string(),
        version,
        maintainer: MAINTAINER.to_string(),
        maintainer_email: MAINTAINER_EMAIL.to_string(),
        author: AUTHOR.to_string(),
        description: DESCRIPTION.to_string(),
        long_description,
        long_description_content_type: "text/markdown".to_string(),
        url: URL.to_string(),
        download_url: DOWNLOAD_URL.to_string(),
        project_urls: ProjectUrls {
            bug_tracker: BUG_TRACKER.to_string(),
            source_code: URL.to_string(),
        },
        license: LICENSE.to_string(),
        requires: REQUIRES.iter().map(|r| (*r).to_string()).collect(),
        extension: ExtensionSpec::pyoorb(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Write the metadata as pretty JSON, creating parent directories.
pub fn write(meta: &PackageMetadata, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{Outcome, ScriptedRunner};

    fn tree_with_readme() -> (tempfile::TempDir, std::path::PathBuf) {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        std::fs::create_dir(root.join("python")).unwrap();
        std::fs::write(root.join("python/README.md"), "# pyoorb\n").unwrap();
        (tree, root)
    }

    #[test]
    fn test_generate_wires_version_and_readme() {
        let (_tree, root) = tree_with_readme();
        let runner = ScriptedRunner::new(vec![Outcome::Stdout("0.5.2\n")]);

        let meta = generate(&runner, &root).unwrap();
        assert_eq!(meta.name, "pyoorb");
        assert_eq!(meta.version, "0.5.2");
        assert_eq!(meta.long_description, "# pyoorb\n");
        assert_eq!(meta.requires, vec!["numpy".to_string()]);
    }

    #[test]
    fn test_generate_fails_before_finalizing_when_version_fails() {
        let (_tree, root) = tree_with_readme();
        let runner = ScriptedRunner::new(vec![Outcome::Fail]);
        assert!(generate(&runner, &root).is_err());
    }

    #[test]
    fn test_json_shape() {
        let (_tree, root) = tree_with_readme();
        let runner = ScriptedRunner::new(vec![Outcome::Stdout("0.5.2\n")]);
        let meta = generate(&runner, &root).unwrap();

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["project_urls"]["Bug Tracker"], BUG_TRACKER);
        assert_eq!(json["project_urls"]["Source Code"], URL);
        assert_eq!(json["license"], "GPL3");
        assert_eq!(json["extension"]["name"], "pyoorb");
        assert_eq!(json["extension"]["include_dirs"][0], "../build");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (_tree, root) = tree_with_readme();
        let runner = ScriptedRunner::new(vec![Outcome::Stdout("0.5.2\n")]);
        let meta = generate(&runner, &root).unwrap();

        let path = root.join("python/build_py/metadata.json");
        write(&meta, &path).unwrap();

        let read_back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back["version"], "0.5.2");
    }
}
