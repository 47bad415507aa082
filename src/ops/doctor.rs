//! Environment health checks.
//!
//! The `doctor` command verifies that the collaborators slipway probes at
//! build-configuration time are actually present: the toolkit config
//! command, a C compiler, a Python interpreter, and the staging
//! configuration.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::platform::detect::{compiler_version, detect};
use crate::util::config::Config;
use crate::util::diagnostic::suggestions;
use crate::util::process::{find_c_compiler, find_python, find_toolkit_config};

/// Result of a single health check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorReport {
    /// Resolved platform variant, if detection succeeded
    pub platform: Option<String>,

    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }
}

/// Run the environment checks.
pub fn doctor(config: &Config) -> Result<DoctorReport> {
    let mut report = DoctorReport::default();

    match detect() {
        Ok(profile) => {
            report.platform = Some(profile.variant.to_string());
            report.add(CheckResult::pass(
                "platform",
                format!("{} ({}, {})", profile.variant, profile.os_name, profile.platform_name),
            ));
        }
        Err(e) => {
            report.add(CheckResult::fail("platform", e.to_string()));
        }
    }

    match find_c_compiler() {
        Some(cc) => {
            let message = match compiler_version(&cc) {
                Ok(version) => format!("{} ({})", cc.display(), version.join(".")),
                Err(_) => cc.display().to_string(),
            };
            report.add(CheckResult::pass("compiler", message).with_path(cc));
        }
        None => {
            report.add(CheckResult::fail("compiler", "no C compiler found"));
        }
    }

    match find_toolkit_config() {
        Some(path) => {
            report.add(
                CheckResult::pass("toolkit-config", path.display().to_string())
                    .with_path(path)
                    .optional(),
            );
        }
        None => {
            report.add(
                CheckResult::fail("toolkit-config", suggestions::NO_TOOLKIT_CONFIG).optional(),
            );
        }
    }

    match find_python() {
        Some(path) => {
            report.add(
                CheckResult::pass("python", path.display().to_string())
                    .with_path(path)
                    .optional(),
            );
        }
        None => {
            report.add(CheckResult::fail("python", suggestions::NO_PYTHON).optional());
        }
    }

    match config.staging_layout() {
        Some(layout) => {
            report.add(CheckResult::pass(
                "staging",
                format!("{} (project {})", layout.root.display(), layout.project),
            ));
        }
        None => {
            report.add(CheckResult::fail("staging", suggestions::NO_STAGE_DIR).optional());
        }
    }

    Ok(report)
}

/// Format a report for terminal output.
pub fn format_report(report: &DoctorReport) -> String {
    let mut output = String::new();

    for check in &report.checks {
        let mark = if check.passed { "ok" } else { "MISSING" };
        output.push_str(&format!("{:>16}: {:<8} {}\n", check.name, mark, check.message));
    }

    if report.all_required_passed() {
        output.push_str("\nall required checks passed\n");
    } else {
        output.push_str("\nrequired checks failed\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_check_accounting() {
        let mut report = DoctorReport::default();
        report.add(CheckResult::pass("platform", "linux"));
        report.add(CheckResult::fail("toolkit-config", "missing").optional());
        assert!(report.all_required_passed());

        report.add(CheckResult::fail("compiler", "missing"));
        assert!(!report.all_required_passed());
    }

    #[test]
    fn test_format_report_lists_checks() {
        let mut report = DoctorReport::default();
        report.add(CheckResult::pass("platform", "linux (posix, linux)"));
        report.add(CheckResult::fail("python", "not found").optional());

        let output = format_report(&report);
        assert!(output.contains("platform"));
        assert!(output.contains("MISSING"));
        assert!(output.contains("all required checks passed"));
    }
}
