//! Staged installation of build artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::env::BuildEnvironment;
use crate::core::staging::StagingLayout;
use crate::util::diagnostic::StagingNotConfiguredError;
use crate::util::fs::{copy_preserving, ensure_dir};

/// The kind of artifact being installed, which fixes its destination
/// under the staging root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallKind {
    /// Executables go to `bin/`
    Executable,
    /// Libraries go to `lib/`
    Library,
    /// Headers go to `include/<project>/<subpath>/`
    Header { subpath: PathBuf },
    /// Python modules go to `lib/pymod/<project>/<subpath>/`
    PythonModule { subpath: PathBuf },
    /// Plugins go to `lib/plugins/`
    Plugin,
}

impl InstallKind {
    /// Destination directory for this kind under the given layout.
    pub fn dest_dir(&self, layout: &StagingLayout) -> PathBuf {
        match self {
            InstallKind::Executable => layout.bin_dir(),
            InstallKind::Library => layout.lib_dir(),
            InstallKind::Header { subpath } => layout.include_dir(subpath),
            InstallKind::PythonModule { subpath } => layout.pymod_dir(subpath),
            InstallKind::Plugin => layout.plugin_dir(),
        }
    }
}

/// Install artifacts into the staging tree.
///
/// Copies each source into the kind's destination directory, registers
/// the copies on the default build target, and returns the installed
/// paths — always as a list, even for a single artifact, so callers can
/// iterate unconditionally.
///
/// Fails with [`StagingNotConfiguredError`] before touching the
/// filesystem if no staging root has been set.
pub fn install(
    env: &mut dyn BuildEnvironment,
    kind: &InstallKind,
    sources: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let layout = env.staging().ok_or(StagingNotConfiguredError)?;
    let dest_dir = kind.dest_dir(layout);
    ensure_dir(&dest_dir)?;

    let mut installed = Vec::with_capacity(sources.len());
    for source in sources {
        let file_name = source
            .file_name()
            .with_context(|| format!("artifact has no file name: {}", source.display()))?;
        let dest = dest_dir.join(file_name);
        copy_preserving(source, &dest)?;
        tracing::debug!("installed {} -> {}", source.display(), dest.display());
        installed.push(dest);
    }

    env.mark_default(&installed);
    Ok(installed)
}

/// Mirror a source tree into `dest_root`.
///
/// Every directory is recreated under the destination (already-existing
/// directories are fine), every regular file is copied with its
/// timestamps preserved, and entries whose names start with `.` are
/// skipped along with everything beneath them. Individual copy errors
/// are not caught; the walk aborts on the first failure.
pub fn install_tree(dest_root: &Path, src_tree: &Path) -> Result<()> {
    let walker = WalkDir::new(src_tree).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_string_lossy()
                .starts_with('.')
    });

    for entry in walker {
        let entry = entry.with_context(|| {
            format!("failed to walk source tree: {}", src_tree.display())
        })?;
        let relative = entry
            .path()
            .strip_prefix(src_tree)
            .expect("walked entry is under the walk root");
        let dest = dest_root.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&dest)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dest.parent() {
                ensure_dir(parent)?;
            }
            copy_preserving(entry.path(), &dest)?;
        }
    }

    Ok(())
}
