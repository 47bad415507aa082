//! GUI-toolkit flag probing.
//!
//! The toolkit ships a config command (`wx-config`) that prints the
//! compiler and linker flags it needs. slipway runs it, whitespace-splits
//! the output, and routes every token by its prefix into the matching
//! environment list. Build correctness depends on this routing staying
//! exact, so the dispatch table lives in one place and nothing else
//! interprets flag strings.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::env::{BuildEnvironment, ConfigKey};
use crate::core::profile::{PlatformProfile, Variant};
use crate::util::process::{find_toolkit_config, ProcessBuilder};

/// How tokens are routed for a particular variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions {
    /// Pair `-framework X` into a framework link string (darwin)
    pub frameworks: bool,
    /// Route absolute paths to the static-libs list (irix static link)
    pub static_paths: bool,
}

/// Route probe tokens into the environment by prefix.
///
/// `-D…` goes to compiler-flags, `-I…` to include-path, `-l…` to
/// libraries and `-L…` to library-path (each with its prefix stripped).
/// With `frameworks` enabled, a literal `-framework` captures exactly the
/// next token as a framework name; a trailing `-framework` with nothing
/// after it is dropped. With `static_paths` enabled, tokens starting with
/// `/` go to static-libs. Everything else lands in link-flags.
pub fn route_tokens(env: &mut dyn BuildEnvironment, tokens: &[String], opts: RouteOptions) {
    let mut framework_link = String::new();
    let mut next_is_framework = false;

    for token in tokens {
        if next_is_framework {
            framework_link.push_str(&format!(" -framework {}", token));
            next_is_framework = false;
        } else if token.starts_with("-D") {
            env.append(ConfigKey::CompilerFlags, vec![token.clone()]);
        } else if let Some(dir) = token.strip_prefix("-I") {
            env.append(ConfigKey::IncludePath, vec![dir.to_string()]);
        } else if let Some(lib) = token.strip_prefix("-l") {
            env.append(ConfigKey::Libraries, vec![lib.to_string()]);
        } else if let Some(dir) = token.strip_prefix("-L") {
            env.append(ConfigKey::LibraryPath, vec![dir.to_string()]);
        } else if opts.frameworks && token == "-framework" {
            next_is_framework = true;
        } else if opts.static_paths && token.starts_with('/') {
            env.append(ConfigKey::StaticLibs, vec![token.clone()]);
        } else {
            env.append(ConfigKey::LinkFlags, vec![token.clone()]);
        }
    }

    if !framework_link.is_empty() {
        env.append(ConfigKey::LinkFlags, vec![framework_link]);
    }
}

/// The toolkit configuration command.
#[derive(Debug, Clone)]
pub struct ToolkitProbe {
    command: PathBuf,
}

impl ToolkitProbe {
    /// Use a specific config command.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        ToolkitProbe {
            command: command.into(),
        }
    }

    /// Discover the config command on PATH.
    pub fn discover() -> Result<Self> {
        let command = find_toolkit_config().ok_or_else(|| {
            anyhow::anyhow!(
                "toolkit config command not found\n{}",
                crate::util::diagnostic::suggestions::NO_TOOLKIT_CONFIG
            )
        })?;
        Ok(ToolkitProbe { command })
    }

    /// The command being probed.
    pub fn command(&self) -> &PathBuf {
        &self.command
    }

    /// Query and route the toolkit's compiler and linker flags.
    ///
    /// Probe failures are fatal and propagate as-is; there is no retry.
    /// No-op on win32, where the toolkit build is not flag-driven.
    pub fn apply(&self, profile: &PlatformProfile, env: &mut dyn BuildEnvironment) -> Result<()> {
        if profile.variant == Variant::Win32 {
            return Ok(());
        }

        let opts = RouteOptions {
            frameworks: profile.variant == Variant::Darwin,
            static_paths: profile.variant == Variant::Irix,
        };

        let cxxflags = ProcessBuilder::new(&self.command)
            .arg("--cxxflags")
            .probe_tokens()?;
        tracing::debug!("toolkit cxxflags: {:?}", cxxflags);
        route_tokens(env, &cxxflags, opts);

        let libs_probe = if profile.variant == Variant::Irix {
            // MIPSpro links the toolkit statically
            ProcessBuilder::new(&self.command).args(["--static", "--libs"])
        } else {
            ProcessBuilder::new(&self.command).arg("--libs")
        };
        let libs = libs_probe.probe_tokens()?;
        tracing::debug!("toolkit libs: {:?}", libs);
        route_tokens(env, &libs, opts);

        Ok(())
    }
}
