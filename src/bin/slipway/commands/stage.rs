//! `slipway stage` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{StageArgs, StageCommands, StageInstallArgs, StageSetArgs};
use crate::commands::effective_config;
use slipway::core::env::{BuildEnvironment, MemoryEnvironment};
use slipway::ops::{install, InstallKind};
use slipway::util::config::{global_config_path, project_config_path, Config};
use slipway::util::fs::glob_files;

pub fn execute(args: StageArgs) -> Result<()> {
    match args.command {
        StageCommands::Show => show(),
        StageCommands::Set(args) => set(args),
        StageCommands::Install(args) => run_install(args),
    }
}

fn show() -> Result<()> {
    let config = effective_config();
    match config.staging_layout() {
        Some(layout) => {
            println!("staging root: {}", layout.root.display());
            println!("project: {}", layout.project);
        }
        None => {
            println!("staging root not configured");
        }
    }
    Ok(())
}

fn set(args: StageSetArgs) -> Result<()> {
    let path = if args.global {
        global_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory for global config"))?
    } else {
        let cwd = std::env::current_dir()?;
        project_config_path(&cwd)
    };

    let mut config = Config::load_or_default(&path);
    config.stage.dir = Some(args.dir.clone());
    if let Some(project) = args.project {
        config.stage.project = project;
    }
    config.save(&path)?;

    println!("staging root set to {}", args.dir.display());
    Ok(())
}

fn run_install(args: StageInstallArgs) -> Result<()> {
    let config = effective_config();

    let mut env = MemoryEnvironment::new();
    if let Some(layout) = config.staging_layout() {
        env.set_staging(layout);
    }

    let kind = match args.kind.as_str() {
        "exe" => InstallKind::Executable,
        "lib" => InstallKind::Library,
        "header" => InstallKind::Header {
            subpath: args.into.clone().unwrap_or_default(),
        },
        "pymod" => InstallKind::PythonModule {
            subpath: args.into.clone().unwrap_or_default(),
        },
        "plugin" => InstallKind::Plugin,
        other => anyhow::bail!("unknown artifact kind `{}`", other),
    };

    let cwd = std::env::current_dir()?;
    let mut artifacts: Vec<PathBuf> = Vec::new();
    for spec in &args.artifacts {
        let literal = PathBuf::from(spec);
        if literal.exists() {
            artifacts.push(literal);
        } else {
            artifacts.extend(glob_files(&cwd, &[spec.clone()])?);
        }
    }
    if artifacts.is_empty() {
        anyhow::bail!("no artifacts matched {:?}", args.artifacts);
    }

    let installed = install(&mut env, &kind, &artifacts)?;
    for path in &installed {
        println!("installed {}", path.display());
    }

    Ok(())
}
