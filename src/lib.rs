//! slipway - platform detection and environment staging for the iplt build
//!
//! This crate is the build-system glue layered onto the enclosing build
//! tool: it identifies the host platform, applies variant-specific flag
//! configuration to a build environment, merges environments, and stages
//! finished artifacts into the install tree. Dependency resolution,
//! scheduling and the actual compile/link work all belong to the build
//! tool and are reached only through the [`core::env::BuildEnvironment`]
//! interface.

pub mod core;
pub mod ops;
pub mod platform;
pub mod util;

pub use core::{
    env::{BuildEnvironment, ConfigKey, EnvValue, MemoryEnvironment},
    profile::{OsFamily, PlatformProfile, Variant},
    staging::StagingLayout,
};

pub use ops::{install, install_tree, merge, InstallKind};
pub use platform::{detect, ToolkitProbe};
