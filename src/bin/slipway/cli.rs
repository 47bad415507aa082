//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// slipway - platform detection and environment staging for the iplt build
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the host platform
    Detect(DetectArgs),

    /// Check that the build-time collaborators are available
    Doctor(DoctorArgs),

    /// Resolve the platform and print the configured flag lists
    Flags(FlagsArgs),

    /// Staging root management and artifact installation
    Stage(StageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DetectArgs {
    /// Emit the profile as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Query the GUI toolkit config command as well
    #[arg(long)]
    pub toolkit: bool,

    /// Configure for embedding this Python version (e.g. 2.2);
    /// empty means the interpreter on PATH
    #[arg(long)]
    pub python: Option<String>,

    /// Include the OpenGL library set
    #[arg(long)]
    pub gl: bool,
}

#[derive(Args)]
pub struct StageArgs {
    #[command(subcommand)]
    pub command: StageCommands,
}

#[derive(Subcommand)]
pub enum StageCommands {
    /// Show the current staging configuration
    Show,

    /// Set the staging root for this project
    Set(StageSetArgs),

    /// Install artifacts into the staging tree
    Install(StageInstallArgs),
}

#[derive(Args)]
pub struct StageSetArgs {
    /// Staging root directory
    #[arg(long)]
    pub dir: PathBuf,

    /// Project name used in staged include/pymod paths
    #[arg(long)]
    pub project: Option<String>,

    /// Write to the global config instead of the project config
    #[arg(long)]
    pub global: bool,
}

#[derive(Args)]
pub struct StageInstallArgs {
    /// Artifact kind: exe, lib, header, pymod or plugin
    #[arg(long, value_parser = ["exe", "lib", "header", "pymod", "plugin"])]
    pub kind: String,

    /// Subpath for header/pymod destinations
    #[arg(long)]
    pub into: Option<PathBuf>,

    /// Files (or glob patterns) to install
    #[arg(required = true)]
    pub artifacts: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
