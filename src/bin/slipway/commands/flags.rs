//! `slipway flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use crate::commands::effective_config;
use slipway::core::env::{BuildEnvironment, MemoryEnvironment};
use slipway::platform::{
    apply_compiler_flags, apply_gl_libraries, apply_python_info, detect, ToolkitProbe,
};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let profile = detect()?;

    let mut env = MemoryEnvironment::new();
    if let Some(layout) = effective_config().staging_layout() {
        env.set_staging(layout);
    }

    apply_compiler_flags(&profile, &mut env);

    if args.toolkit {
        let probe = ToolkitProbe::discover()?;
        probe.apply(&profile, &mut env)?;
    }

    if let Some(ref version) = args.python {
        apply_python_info(&profile, &mut env, version)?;
    }

    if args.gl {
        apply_gl_libraries(&profile, &mut env);
    }

    println!("# Flags for the {} platform:", profile.variant);
    for (key, value) in env.entries() {
        println!("{}:", key);
        for item in value.as_list() {
            println!("  {}", item);
        }
    }

    Ok(())
}
