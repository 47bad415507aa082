//! Python interpreter include/library resolution.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::env::{BuildEnvironment, ConfigKey, EnvValue};
use crate::core::profile::{PlatformProfile, Variant};
use crate::util::diagnostic::{suggestions, MissingDependencyError};
use crate::util::process::{find_python, ProcessBuilder};

/// Darwin ships Python as a framework; headers live outside any prefix.
const DARWIN_PYTHON_HEADERS: &str = "/System/Library/Frameworks/Python.framework/Headers";

/// Fallback include directory appended to the search list.
const SYSTEM_INCLUDE: &str = "/usr/include";

/// Version and prefix of the interpreter found on PATH.
#[derive(Debug, Clone)]
pub struct InterpreterInfo {
    /// `major.minor`, e.g. `3.11`
    pub version: String,
    /// `sys.prefix`
    pub prefix: PathBuf,
}

/// Introspect the PATH interpreter for its version and prefix.
///
/// Probe failures (no interpreter, abnormal exit) are fatal and
/// propagate uncaught.
pub fn interpreter_info() -> Result<InterpreterInfo> {
    let python = find_python().ok_or_else(|| {
        anyhow::anyhow!("python interpreter not found\n{}", suggestions::NO_PYTHON)
    })?;

    let version = ProcessBuilder::new(&python)
        .args(["-c", "import sys; print('%d.%d' % sys.version_info[:2])"])
        .probe_tokens()?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty version output from {}", python.display()))?;

    let prefix = ProcessBuilder::new(&python)
        .args(["-c", "import sys; print(sys.prefix)"])
        .probe_tokens()?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty prefix output from {}", python.display()))?;

    Ok(InterpreterInfo {
        version,
        prefix: PathBuf::from(prefix),
    })
}

/// Configure the environment for embedding the Python interpreter.
///
/// With an empty `version`, the interpreter on PATH supplies its own
/// version and prefix. With an explicit `version`, the include-path
/// directories (plus `/usr/include`) are searched for a `python<version>`
/// subdirectory, first match wins, and the matching library name is
/// linked; no match is fatal.
///
/// Darwin ignores `version` entirely and links the Python framework;
/// win32 only appends the interpreter prefix's include directory.
pub fn apply_python_info(
    profile: &PlatformProfile,
    env: &mut dyn BuildEnvironment,
    version: &str,
) -> Result<()> {
    match profile.variant {
        Variant::Darwin => {
            env.append(ConfigKey::IncludePath, vec![DARWIN_PYTHON_HEADERS.into()]);
            env.append(
                ConfigKey::LinkFlags,
                vec!["-framework".into(), "Python".into()],
            );
            crate::platform::flags::rewrite_shared_link_for_bundle(env);
            Ok(())
        }
        Variant::Win32 => {
            let info = interpreter_info()?;
            let include = info.prefix.join("include");
            env.append(
                ConfigKey::IncludePath,
                vec![include.to_string_lossy().into_owned()],
            );
            Ok(())
        }
        _ => {
            let (include_dir, lib_name) = if version.is_empty() {
                let info = interpreter_info()?;
                let dir = info
                    .prefix
                    .join("include")
                    .join(format!("python{}", info.version));
                (dir, format!("python{}", info.version))
            } else {
                let dir = locate_versioned_include(env, version)?;
                (dir, format!("python{}", version))
            };

            env.append(
                ConfigKey::IncludePath,
                vec![include_dir.to_string_lossy().into_owned()],
            );
            env.append(ConfigKey::Libraries, vec![lib_name]);
            Ok(())
        }
    }
}

/// Search the include path (plus `/usr/include`) for `python<version>`.
fn locate_versioned_include(
    env: &dyn BuildEnvironment,
    version: &str,
) -> Result<PathBuf, MissingDependencyError> {
    let mut search: Vec<PathBuf> = env
        .get(ConfigKey::IncludePath)
        .map(EnvValue::as_list)
        .unwrap_or_default()
        .into_iter()
        .map(PathBuf::from)
        .collect();
    search.push(PathBuf::from(SYSTEM_INCLUDE));

    for dir in &search {
        let candidate = dir.join(format!("python{}", version));
        if candidate.is_dir() {
            tracing::debug!("found python {} headers in {}", version, candidate.display());
            return Ok(candidate);
        }
    }

    Err(MissingDependencyError {
        version: version.to_string(),
        searched: search,
    })
}
