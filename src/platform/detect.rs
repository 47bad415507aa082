//! Host platform identification.

use std::path::Path;

use anyhow::Result;

use crate::core::profile::{OsFamily, PlatformProfile, Variant};
use crate::util::diagnostic::UnsupportedPlatformError;
use crate::util::process::ProcessBuilder;

/// Resolve two host-identification signals into a platform profile.
///
/// Both signals are lower-cased before comparison. First match wins:
/// a posix OS whose platform name contains `linux`, `darwin` or `irix`
/// maps to that variant, any other posix host is generic posix, and
/// `nt`/`win32` maps to win32. Anything else fails closed.
pub fn resolve(os_name: &str, platform_name: &str) -> Result<PlatformProfile, UnsupportedPlatformError> {
    let os_name = os_name.to_lowercase();
    let platform_name = platform_name.to_lowercase();

    if os_name == "posix" {
        let variant = if platform_name.contains("linux") {
            Variant::Linux
        } else if platform_name.contains("darwin") {
            Variant::Darwin
        } else if platform_name.contains("irix") {
            Variant::Irix
        } else {
            Variant::PosixGeneric
        };
        Ok(PlatformProfile::new(
            OsFamily::Posix,
            variant,
            os_name,
            platform_name,
        ))
    } else if os_name == "nt" && platform_name == "win32" {
        Ok(PlatformProfile::new(
            OsFamily::Windows,
            Variant::Win32,
            os_name,
            platform_name,
        ))
    } else {
        Err(UnsupportedPlatformError {
            os_name,
            platform_name,
        })
    }
}

/// Detect the platform of the running host.
///
/// Translates the process-visible identifiers into the signal vocabulary
/// of [`resolve`] and logs the identification.
pub fn detect() -> Result<PlatformProfile> {
    let os_name = match std::env::consts::FAMILY {
        "unix" => "posix",
        "windows" => "nt",
        other => other,
    };
    let platform_name = match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    };

    let profile = resolve(os_name, platform_name)?;
    tracing::info!("Identified {} platform", profile.variant);
    Ok(profile)
}

/// Query a compiler for its version.
///
/// Runs `<cc> --version`, tokenizes the output, and splits the first
/// dotted numeric token into its components. Fails if the probe fails or
/// no version token is present.
pub fn compiler_version(cc: &Path) -> Result<Vec<String>> {
    let tokens = ProcessBuilder::new(cc).arg("--version").probe_tokens()?;

    let version = tokens
        .iter()
        .find(|t| {
            t.contains('.') && t.chars().next().is_some_and(|c| c.is_ascii_digit())
        })
        .ok_or_else(|| {
            anyhow::anyhow!("no version token in `{} --version` output", cc.display())
        })?;

    Ok(version.split('.').map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_linux() {
        let profile = resolve("posix", "linux2").unwrap();
        assert_eq!(profile.variant, Variant::Linux);
        assert_eq!(profile.family, OsFamily::Posix);
    }

    #[test]
    fn test_resolve_darwin() {
        let profile = resolve("posix", "darwin").unwrap();
        assert_eq!(profile.variant, Variant::Darwin);
    }

    #[test]
    fn test_resolve_irix() {
        let profile = resolve("posix", "irix646").unwrap();
        assert_eq!(profile.variant, Variant::Irix);
    }

    #[test]
    fn test_resolve_generic_posix() {
        let profile = resolve("posix", "freebsd").unwrap();
        assert_eq!(profile.variant, Variant::PosixGeneric);
    }

    #[test]
    fn test_resolve_win32() {
        let profile = resolve("nt", "win32").unwrap();
        assert_eq!(profile.variant, Variant::Win32);
        assert_eq!(profile.family, OsFamily::Windows);
    }

    #[test]
    fn test_resolve_lowercases_signals() {
        let profile = resolve("POSIX", "Linux2").unwrap();
        assert_eq!(profile.variant, Variant::Linux);
        assert_eq!(profile.os_name, "posix");
        assert_eq!(profile.platform_name, "linux2");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let first = resolve("posix", "darwin").unwrap();
        let second = resolve("posix", "darwin").unwrap();
        assert_eq!(first.variant, second.variant);
    }

    #[test]
    fn test_unknown_signals_fail_closed() {
        assert!(resolve("unknown", "win32").is_err());
        assert!(resolve("nt", "cygwin").is_err());
        let err = resolve("java", "jvm").unwrap_err();
        assert_eq!(err.os_name, "java");
    }

    #[test]
    fn test_detect_on_host() {
        // The host this runs on is always one of the supported families.
        let profile = detect().unwrap();
        assert_eq!(profile.variant, detect().unwrap().variant);
    }
}
