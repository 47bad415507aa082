//! Platform resolution and per-variant environment configuration.
//!
//! [`detect`] inspects the host's process-visible identifiers and returns
//! a [`PlatformProfile`](crate::core::profile::PlatformProfile); the free
//! functions in the submodules then apply variant-specific configuration
//! to a build environment. The variant set is closed and historical, so
//! everything dispatches on the profile tag rather than through trait
//! objects.

pub mod detect;
pub mod flags;
pub mod python;
pub mod toolkit;

pub use detect::{compiler_version, detect, resolve};
pub use flags::{
    apply_compiler_flags, apply_gl_libraries, apply_plugin_info, extend_shared_library_path,
    set_pymod_builder,
};
pub use python::{apply_python_info, interpreter_info};
pub use toolkit::{route_tokens, RouteOptions, ToolkitProbe};
