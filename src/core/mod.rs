//! Core data structures for slipway.
//!
//! The foundational types everything else operates on:
//! - The build-environment interface and its in-memory adapter
//! - The resolved platform profile
//! - The staging directory layout

pub mod env;
pub mod profile;
pub mod staging;

pub use env::{BuildEnvironment, BuilderSpec, ConfigKey, EnvValue, MemoryEnvironment};
pub use profile::{OsFamily, PlatformProfile, Variant};
pub use staging::StagingLayout;
