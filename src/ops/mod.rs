//! High-level operations.
//!
//! Environment merging, staged installation and the doctor checks.

pub mod doctor;
pub mod install;
pub mod merge;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use install::{install, install_tree, InstallKind};
pub use merge::{merge, MERGE_KEYS};
