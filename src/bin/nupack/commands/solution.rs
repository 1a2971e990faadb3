//! `nupack solution` command

use anyhow::Result;

use crate::cli::SolutionArgs;
use nupack::ops::{pack_solution, SolutionPackOptions};
use nupack::BuildProfile;

pub fn execute(args: SolutionArgs) -> Result<()> {
    let profile = if args.release {
        BuildProfile::Release
    } else {
        BuildProfile::Debug
    };

    let outcomes = pack_solution(&SolutionPackOptions {
        solution_dir: args.solution,
        bin_folder: args.bin,
        profile,
        no_pack: args.no_pkg,
        include_current_project: args.include_current_proj,
        prerelease_override: args.prerelease,
    })?;

    for outcome in &outcomes {
        println!("wrote {}", outcome.nuspec_path.display());
    }
    println!("packed {} project(s)", outcomes.len());
    Ok(())
}
