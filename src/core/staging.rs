//! Staging directory layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default project name used in staged include/pymod paths.
pub const DEFAULT_PROJECT: &str = "iplt";

/// The staged directory tree build artifacts are installed into.
///
/// The subdirectory conventions are fixed: `bin/`, `lib/`,
/// `include/<project>/<location>/`, `lib/pymod/<project>/<location>/` and
/// `lib/plugins/`. Only the root and the project name vary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingLayout {
    /// Root of the staging tree
    pub root: PathBuf,
    /// Project name spliced into include/pymod paths
    #[serde(default = "default_project")]
    pub project: String,
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

impl StagingLayout {
    /// Create a layout rooted at `root` for the default project.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StagingLayout {
            root: root.into(),
            project: default_project(),
        }
    }

    /// Use a different project name.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Destination for executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Destination for libraries.
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// Destination for headers under the given location.
    pub fn include_dir(&self, location: &Path) -> PathBuf {
        self.root.join("include").join(&self.project).join(location)
    }

    /// Destination for Python modules under the given location.
    pub fn pymod_dir(&self, location: &Path) -> PathBuf {
        self.root
            .join("lib")
            .join("pymod")
            .join(&self.project)
            .join(location)
    }

    /// Destination for plugins.
    pub fn plugin_dir(&self) -> PathBuf {
        self.root.join("lib").join("plugins")
    }
}
