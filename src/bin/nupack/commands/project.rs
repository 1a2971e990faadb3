//! `nupack project` command

use anyhow::Result;

use crate::cli::ProjectArgs;
use nupack::ops::{pack_project, ProjectPackOptions};
use nupack::BuildProfile;

pub fn execute(args: ProjectArgs) -> Result<()> {
    let profile = if args.release {
        BuildProfile::Release
    } else {
        BuildProfile::Debug
    };

    let outcome = pack_project(&ProjectPackOptions {
        project: args.project,
        assembly: args.assembly,
        profile,
        no_pack: args.no_pkg,
        include_current_project: args.include_current_proj,
        prerelease_override: args.prerelease,
        machine_bin: None,
        output_dir: args.output,
    })?;

    println!("wrote {}", outcome.nuspec_path.display());
    if let Some(output) = outcome.pack_output {
        print!("{output}");
    }
    Ok(())
}
