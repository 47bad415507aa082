//! Per-variant build environment mutators.
//!
//! Each function appends to or replaces only the keys it documents and
//! reads nothing else. Re-applying one appends the same flags again; the
//! merge layer is where duplicates get collapsed.

use anyhow::{bail, Result};

use crate::core::env::{BuildEnvironment, ConfigKey, EnvValue, PYMOD_BUILDER, SHARED_LIBRARY_BUILDER};
use crate::core::profile::{PlatformProfile, Variant};

/// The Irix MIPSpro invocation is passed through as one literal flag
/// string, not token-split.
const IRIX_COMPILER_FLAGS: &str =
    "-DIRIX -LANG:std -n32 -no_auto_include -mips3 -woff 1152,1174,1183,1355,1460,3333,3506";

/// Apply variant-specific compiler flags to the environment.
///
/// Generic posix is a no-op. Darwin additionally replaces the
/// shared-library compile/link scalars wholesale.
pub fn apply_compiler_flags(profile: &PlatformProfile, env: &mut dyn BuildEnvironment) {
    match profile.variant {
        Variant::PosixGeneric => {}
        Variant::Linux => {
            env.append(
                ConfigKey::CompilerFlags,
                vec!["-DLINUX".into(), "-pipe".into(), "-Wall".into()],
            );
        }
        Variant::Darwin => {
            env.append(
                ConfigKey::CompilerFlags,
                vec![
                    "-DOSX".into(),
                    "-Wno-long-double".into(),
                    "-pipe".into(),
                    "-Wall".into(),
                ],
            );
            env.set(ConfigKey::SharedCcFlags, EnvValue::scalar("-dynamic"));
            env.set(ConfigKey::SharedCxxFlags, EnvValue::scalar("-dynamic"));
            env.set(
                ConfigKey::SharedLinkFlags,
                EnvValue::scalar("-dynamiclib -undefined suppress -Wl,-flat_namespace"),
            );
        }
        Variant::Irix => {
            env.append(ConfigKey::CompilerFlags, vec![IRIX_COMPILER_FLAGS.into()]);
            env.append(ConfigKey::Libraries, vec!["m".into(), "pthread".into()]);
        }
        Variant::Win32 => {
            env.append(ConfigKey::CompilerFlags, vec!["-DWIN32".into()]);
        }
    }
}

/// Append the OpenGL-family libraries the variant needs.
pub fn apply_gl_libraries(profile: &PlatformProfile, env: &mut dyn BuildEnvironment) {
    match profile.variant {
        Variant::Linux => {
            env.append(
                ConfigKey::Libraries,
                vec![
                    "glut".into(),
                    "GLU".into(),
                    "GL".into(),
                    "Xi".into(),
                    "Xmu".into(),
                ],
            );
            env.append(ConfigKey::LibraryPath, vec!["/usr/X11R6/lib".into()]);
        }
        Variant::Darwin => {
            env.append(ConfigKey::Libraries, vec!["objc".into()]);
            env.append(
                ConfigKey::LinkFlags,
                vec!["-framework OpenGL -framework GLUT".into()],
            );
        }
        _ => {}
    }
}

/// Configure the environment for building loadable plugins.
///
/// Appends the core library to the link set; on darwin, rewrites the
/// shared-library link flags to produce a loadable bundle instead of a
/// dylib.
pub fn apply_plugin_info(profile: &PlatformProfile, env: &mut dyn BuildEnvironment) {
    if !profile.variant.is_posix() {
        return;
    }

    let core_lib = env
        .staging()
        .map(|layout| layout.project.clone())
        .unwrap_or_else(|| crate::core::staging::DEFAULT_PROJECT.to_string());
    env.append(ConfigKey::Libraries, vec![core_lib]);

    if profile.variant == Variant::Darwin {
        rewrite_shared_link_for_bundle(env);
    }
}

/// Register the `Pymod` build rule.
///
/// On the posix family this is the shared-library rule with the filename
/// prefix cleared, so `_img.so` comes out instead of `lib_img.so`. Irix
/// and win32 have no pymod rule.
pub fn set_pymod_builder(profile: &PlatformProfile, env: &mut dyn BuildEnvironment) -> Result<()> {
    match profile.variant {
        Variant::PosixGeneric | Variant::Linux | Variant::Darwin => {
            let Some(shared) = env.builder(SHARED_LIBRARY_BUILDER) else {
                bail!("no `{}` builder registered in the environment", SHARED_LIBRARY_BUILDER);
            };
            let pymod = shared.without_prefix();
            env.register_builder(PYMOD_BUILDER, pymod);
            Ok(())
        }
        Variant::Irix | Variant::Win32 => Ok(()),
    }
}

/// Append a path to the process-wide shared-library search path.
///
/// This mutates `LD_LIBRARY_PATH` of the running process: an explicit
/// read-modify-write that is not atomic, which is fine because the build
/// model is single-threaded. No-op on win32.
pub fn extend_shared_library_path(profile: &PlatformProfile, path: &str) {
    if !profile.variant.is_posix() {
        return;
    }

    let current = std::env::var("LD_LIBRARY_PATH").unwrap_or_default();
    let extended = if current.is_empty() {
        path.to_string()
    } else {
        format!("{}:{}", current, path)
    };
    tracing::debug!("LD_LIBRARY_PATH extended with {}", path);
    std::env::set_var("LD_LIBRARY_PATH", extended);
}

/// Rewrite the shared-library link scalars so the product is a loadable
/// bundle with a `.so` suffix.
pub(crate) fn rewrite_shared_link_for_bundle(env: &mut dyn BuildEnvironment) {
    if let Some(flags) = env.get(ConfigKey::SharedLinkFlags).and_then(EnvValue::as_scalar) {
        let rewritten = flags
            .split_whitespace()
            .map(|tok| if tok == "-dynamiclib" { "-bundle" } else { tok })
            .collect::<Vec<_>>()
            .join(" ");
        env.set(ConfigKey::SharedLinkFlags, EnvValue::scalar(rewritten));
    }
    env.set(ConfigKey::SharedLibSuffix, EnvValue::scalar(".so"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MemoryEnvironment;
    use crate::core::profile::OsFamily;
    use crate::core::staging::StagingLayout;

    fn profile(variant: Variant) -> PlatformProfile {
        let family = if variant == Variant::Win32 {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        };
        PlatformProfile::new(family, variant, "posix", variant.as_str())
    }

    #[test]
    fn test_generic_posix_flags_are_noop() {
        let mut env = MemoryEnvironment::new();
        apply_compiler_flags(&profile(Variant::PosixGeneric), &mut env);
        assert!(env.get(ConfigKey::CompilerFlags).is_none());
    }

    #[test]
    fn test_linux_flags() {
        let mut env = MemoryEnvironment::new();
        apply_compiler_flags(&profile(Variant::Linux), &mut env);
        assert_eq!(
            env.get(ConfigKey::CompilerFlags),
            Some(&EnvValue::list(["-DLINUX", "-pipe", "-Wall"]))
        );
    }

    #[test]
    fn test_darwin_flags_replace_shared_scalars() {
        let mut env = MemoryEnvironment::new();
        env.set(ConfigKey::SharedLinkFlags, EnvValue::scalar("-shared"));
        apply_compiler_flags(&profile(Variant::Darwin), &mut env);

        assert_eq!(
            env.get(ConfigKey::SharedCcFlags),
            Some(&EnvValue::scalar("-dynamic"))
        );
        assert_eq!(
            env.get(ConfigKey::SharedLinkFlags),
            Some(&EnvValue::scalar(
                "-dynamiclib -undefined suppress -Wl,-flat_namespace"
            ))
        );
        let flags = env.get(ConfigKey::CompilerFlags).unwrap().as_list();
        assert!(flags.contains(&"-DOSX".to_string()));
    }

    #[test]
    fn test_irix_flag_string_is_not_split() {
        let mut env = MemoryEnvironment::new();
        apply_compiler_flags(&profile(Variant::Irix), &mut env);

        let flags = env.get(ConfigKey::CompilerFlags).unwrap().as_list();
        assert_eq!(flags.len(), 1);
        assert!(flags[0].starts_with("-DIRIX"));
        assert_eq!(
            env.get(ConfigKey::Libraries),
            Some(&EnvValue::list(["m", "pthread"]))
        );
    }

    #[test]
    fn test_win32_flags() {
        let mut env = MemoryEnvironment::new();
        apply_compiler_flags(&profile(Variant::Win32), &mut env);
        assert_eq!(
            env.get(ConfigKey::CompilerFlags),
            Some(&EnvValue::list(["-DWIN32"]))
        );
    }

    #[test]
    fn test_gl_libraries_linux() {
        let mut env = MemoryEnvironment::new();
        apply_gl_libraries(&profile(Variant::Linux), &mut env);
        let libs = env.get(ConfigKey::Libraries).unwrap().as_list();
        assert!(libs.contains(&"GL".to_string()));
        assert_eq!(
            env.get(ConfigKey::LibraryPath),
            Some(&EnvValue::list(["/usr/X11R6/lib"]))
        );
    }

    #[test]
    fn test_gl_libraries_darwin_uses_frameworks() {
        let mut env = MemoryEnvironment::new();
        apply_gl_libraries(&profile(Variant::Darwin), &mut env);
        let link = env.get(ConfigKey::LinkFlags).unwrap().as_list();
        assert_eq!(link, vec!["-framework OpenGL -framework GLUT"]);
    }

    #[test]
    fn test_plugin_appends_project_library() {
        let mut env = MemoryEnvironment::new();
        env.set_staging(StagingLayout::new("/stage").with_project("estar"));
        apply_plugin_info(&profile(Variant::Linux), &mut env);
        assert_eq!(
            env.get(ConfigKey::Libraries),
            Some(&EnvValue::list(["estar"]))
        );
    }

    #[test]
    fn test_plugin_darwin_builds_bundle() {
        let mut env = MemoryEnvironment::new();
        env.set(
            ConfigKey::SharedLinkFlags,
            EnvValue::scalar("-dynamiclib -undefined suppress"),
        );
        apply_plugin_info(&profile(Variant::Darwin), &mut env);

        assert_eq!(
            env.get(ConfigKey::SharedLinkFlags),
            Some(&EnvValue::scalar("-bundle -undefined suppress"))
        );
        assert_eq!(
            env.get(ConfigKey::SharedLibSuffix),
            Some(&EnvValue::scalar(".so"))
        );
    }

    #[test]
    fn test_pymod_builder_drops_prefix() {
        let mut env = MemoryEnvironment::new();
        set_pymod_builder(&profile(Variant::Darwin), &mut env).unwrap();

        let pymod = env.builder(PYMOD_BUILDER).unwrap();
        assert_eq!(pymod.prefix, "");
        assert_eq!(pymod.suffix, ".so");
    }

    #[test]
    fn test_pymod_builder_noop_on_win32_and_irix() {
        for variant in [Variant::Win32, Variant::Irix] {
            let mut env = MemoryEnvironment::new();
            set_pymod_builder(&profile(variant), &mut env).unwrap();
            assert!(env.builder(PYMOD_BUILDER).is_none());
        }
    }

    #[test]
    fn test_extend_shared_library_path_appends() {
        // Only this test touches LD_LIBRARY_PATH; restore it afterwards.
        let saved = std::env::var("LD_LIBRARY_PATH").ok();
        std::env::set_var("LD_LIBRARY_PATH", "/usr/lib");

        extend_shared_library_path(&profile(Variant::Linux), "/stage/lib");
        assert_eq!(
            std::env::var("LD_LIBRARY_PATH").unwrap(),
            "/usr/lib:/stage/lib"
        );

        match saved {
            Some(v) => std::env::set_var("LD_LIBRARY_PATH", v),
            None => std::env::remove_var("LD_LIBRARY_PATH"),
        }
    }
}
