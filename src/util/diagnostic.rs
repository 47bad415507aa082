//! Typed error taxonomy.
//!
//! Every failure here is fatal: a misconfigured environment must not
//! silently proceed to compile with wrong flags, so there is no retry or
//! partial-success path anywhere in the crate. External probe failures are
//! not represented as their own type; they propagate as the process
//! layer's error, uncaught.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the staging root is not configured.
    pub const NO_STAGE_DIR: &str =
        "help: Set the staging root with `slipway stage set --dir <path>`";

    /// Suggestion when the toolkit config command is missing.
    pub const NO_TOOLKIT_CONFIG: &str =
        "help: Install the wxWidgets development package so wx-config is on PATH";

    /// Suggestion when no Python interpreter is found.
    pub const NO_PYTHON: &str = "help: Install Python or put python3 on PATH";
}

/// Host OS/platform signals match none of the supported variants.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("unknown platform ({os_name}, {platform_name})")]
#[diagnostic(
    code(slipway::platform::unsupported),
    help("Supported platforms: linux, osx, irix, generic posix, win32")
)]
pub struct UnsupportedPlatformError {
    pub os_name: String,
    pub platform_name: String,
}

/// A requested interpreter version's include directory cannot be located.
///
/// Raised only when a version was explicitly requested; an unspecified
/// version falls back to introspecting the interpreter on PATH and never
/// fails this way.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("python include dir for version {version} not found")]
#[diagnostic(
    code(slipway::python::missing_dependency),
    help("Add the directory containing python{version}/ to the include path")
)]
pub struct MissingDependencyError {
    pub version: String,
    pub searched: Vec<PathBuf>,
}

/// An install operation was invoked before the staging root was set.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("staging root not configured")]
#[diagnostic(
    code(slipway::install::staging_not_configured),
    help("Set the staging root before installing artifacts")
)]
pub struct StagingNotConfiguredError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_message() {
        let err = UnsupportedPlatformError {
            os_name: "java".to_string(),
            platform_name: "jvm".to_string(),
        };
        assert_eq!(err.to_string(), "unknown platform (java, jvm)");
    }

    #[test]
    fn test_missing_dependency_message() {
        let err = MissingDependencyError {
            version: "2.2".to_string(),
            searched: vec![PathBuf::from("/usr/include")],
        };
        assert!(err.to_string().contains("version 2.2"));
    }
}
