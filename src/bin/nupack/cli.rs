//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// nupack - build nuspec manifests and NuGet packages from csproj projects
#[derive(Parser)]
#[command(name = "nupack")]
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
    /// Pack one project (post-build usage)
    Project(ProjectArgs),

    /// Pack every packageable project under a solution folder
    Solution(SolutionArgs),

    /// Push a built package to the configured feed
    Push(PushArgs),
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Path to the .csproj file
    pub project: PathBuf,

    /// Path to the built assembly (resolved from the project when omitted)
    #[arg(long)]
    pub assembly: Option<PathBuf>,

    /// Use release build output (default is debug)
    #[arg(long, conflicts_with = "debug")]
    pub release: bool,

    /// Use debug build output
    #[arg(long)]
    pub debug: bool,

    /// Write the nuspec only, do not invoke the packaging tool
    #[arg(long = "no-pkg")]
    pub no_pkg: bool,

    /// Pack this project's own output instead of treating it as a
    /// packaging umbrella
    #[arg(long = "include-current-proj")]
    pub include_current_proj: bool,

    /// Pre-release suffix override; pass an empty value to force a
    /// stable version
    #[arg(long = "pre")]
    pub prerelease: Option<String>,

    /// Folder to write the nuspec to (defaults to the assembly folder)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SolutionArgs {
    /// Solution folder to scan for packageable projects
    pub solution: PathBuf,

    /// Build-server binaries folder, used when project output folders
    /// are empty
    #[arg(long)]
    pub bin: Option<PathBuf>,

    /// Use release build output (default is debug)
    #[arg(long, conflicts_with = "debug")]
    pub release: bool,

    /// Use debug build output
    #[arg(long)]
    pub debug: bool,

    /// Write nuspecs only, do not invoke the packaging tool
    #[arg(long = "no-pkg")]
    pub no_pkg: bool,

    /// Pack each project's own output instead of treating them as
    /// packaging umbrellas
    #[arg(long = "include-current-proj")]
    pub include_current_proj: bool,

    /// Pre-release suffix override; pass an empty value to force a
    /// stable version
    #[arg(long = "pre")]
    pub prerelease: Option<String>,
}

#[derive(Args)]
pub struct PushArgs {
    /// Path to the .nupkg file
    pub package: PathBuf,
}
