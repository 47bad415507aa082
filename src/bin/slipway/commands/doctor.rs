//! `slipway doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use crate::commands::effective_config;
use slipway::ops::{doctor, format_report};

pub fn execute(args: DoctorArgs) -> Result<()> {
    let config = effective_config();
    let report = doctor(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
