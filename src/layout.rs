//! Filesystem layout of the oorb source tree and staging output.

use std::path::{Path, PathBuf};

/// Logical name of the compiled Python extension.
pub const EXTENSION_NAME: &str = "pyoorb";

/// Binding interface sources, relative to `python/`.
pub const BINDING_SOURCES: &[&str] = &["pyoorb.f90", "pyoorb.pyf"];

/// The native build tree. Holds `Makefile` and `make.depends` that the
/// Fortran build requires, so it is never staging output and never
/// cleaned.
pub const NATIVE_BUILD_DIR: &str = "build";

/// Default staging directory name. Deliberately not "build": that name
/// is taken by [`NATIVE_BUILD_DIR`], which source distributions must
/// retain.
pub const DEFAULT_BUILD_BASE: &str = "build_py";

/// Resolved locations inside one oorb checkout.
pub struct Layout {
    root: PathBuf,
    build_base: String,
}

impl Layout {
    pub fn new(root: &Path, build_base: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            build_base: build_base.to_string(),
        }
    }

    /// Where packaging work happens; the build ends here.
    pub fn python_dir(&self) -> PathBuf {
        self.root.join("python")
    }

    /// Where the native build deposits the compiled extension.
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.python_dir().join(&self.build_base)
    }

    pub fn staging_lib_dir(&self) -> PathBuf {
        self.staging_dir().join("lib")
    }

    pub fn artifact_source(&self, file_name: &str) -> PathBuf {
        self.lib_dir().join(file_name)
    }

    pub fn artifact_dest(&self, file_name: &str) -> PathBuf {
        self.staging_lib_dir().join(file_name)
    }
}

/// Compose the artifact filename from the extension name and the
/// platform's native extension suffix.
pub fn artifact_name(ext_suffix: &str) -> String {
    format!("{EXTENSION_NAME}{ext_suffix}")
}
