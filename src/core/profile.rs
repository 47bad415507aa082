//! Host platform identity.

use serde::{Deserialize, Serialize};

/// Operating-system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Posix,
    Windows,
}

impl OsFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Posix => "posix",
            OsFamily::Windows => "windows",
        }
    }
}

/// The closed set of supported platform variants.
///
/// Historical set, not open for extension: the build glue predates any
/// port beyond these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Unrecognized Unix; base Posix behavior only
    PosixGeneric,
    Linux,
    Darwin,
    Irix,
    Win32,
}

impl Variant {
    /// Get the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::PosixGeneric => "generic posix",
            Variant::Linux => "linux",
            Variant::Darwin => "osx",
            Variant::Irix => "irix",
            Variant::Win32 => "win32",
        }
    }

    /// Whether this variant belongs to the Posix family.
    pub fn is_posix(&self) -> bool {
        !matches!(self, Variant::Win32)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the host platform, resolved once per build invocation.
///
/// Immutable after construction; the raw host strings are retained for
/// diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Operating-system family
    pub family: OsFamily,
    /// Resolved variant
    pub variant: Variant,
    /// Raw OS-family signal, lower-cased
    pub os_name: String,
    /// Raw platform-name signal, lower-cased
    pub platform_name: String,
}

impl PlatformProfile {
    /// Create a profile from resolved parts.
    pub fn new(
        family: OsFamily,
        variant: Variant,
        os_name: impl Into<String>,
        platform_name: impl Into<String>,
    ) -> Self {
        PlatformProfile {
            family,
            variant,
            os_name: os_name.into(),
            platform_name: platform_name.into(),
        }
    }
}
