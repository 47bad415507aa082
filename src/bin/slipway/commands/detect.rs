//! `slipway detect` command

use anyhow::Result;

use crate::cli::DetectArgs;
use slipway::platform::detect;

pub fn execute(args: DetectArgs) -> Result<()> {
    let profile = detect()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!(
            "Identified {} platform ({}, {})",
            profile.variant, profile.os_name, profile.platform_name
        );
    }

    Ok(())
}
