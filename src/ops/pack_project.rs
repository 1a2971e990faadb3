//! Implementation of `nupack project`.
//!
//! Runs the whole pipeline for one project: load and detect the dialect,
//! collect and reconcile elements, write the nuspec next to the built
//! assembly, and optionally invoke the external packaging tool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::assemble::{build_manifest, collect, CollectOptions};
use crate::core::pack_config::PackConfig;
use crate::error::PackError;
use crate::project::descriptor::ProjectDescriptor;
use crate::project::dialect::{detect, ProjectDialect};
use crate::project::output::{self, BuildProfile};
use crate::util::{fs, nuget, version_info};

/// Options for packing a single project.
#[derive(Debug, Clone)]
pub struct ProjectPackOptions {
    /// Path to the csproj file.
    pub project: PathBuf,

    /// Path to the built assembly. Resolved from the project's output
    /// folder when not given.
    pub assembly: Option<PathBuf>,

    pub profile: BuildProfile,

    /// Write the nuspec only, skip the external pack step.
    pub no_pack: bool,

    /// Pack this project's own output rather than treating it as a
    /// packaging umbrella. The companion config file can override this.
    pub include_current_project: bool,

    /// Pre-release suffix override: `None` infers from the version
    /// resource, `Some("")` forces a stable version.
    pub prerelease_override: Option<String>,

    /// Build-server binaries folder, used when a project's own output
    /// folder holds no binaries.
    pub machine_bin: Option<PathBuf>,

    /// Folder to write the nuspec to instead of the assembly's folder.
    pub output_dir: Option<PathBuf>,
}

/// Result of packing one project.
#[derive(Debug)]
pub struct PackOutcome {
    pub nuspec_path: PathBuf,
    /// Tool output of the pack step; `None` when only the nuspec was
    /// written.
    pub pack_output: Option<String>,
}

pub fn pack_project(opts: &ProjectPackOptions) -> Result<PackOutcome> {
    let desc = ProjectDescriptor::load(&opts.project)?;
    let dialect = detect(&desc);
    let config = PackConfig::for_project_dir(desc.dir())?;

    let add_framework_references = config
        .as_ref()
        .map(PackConfig::add_framework_references)
        .unwrap_or(false);
    if add_framework_references && dialect.is_sdk() {
        return Err(PackError::FrameworkReferencesUnsupported.into());
    }

    let include_sources = config
        .as_ref()
        .map(PackConfig::include_sources)
        .unwrap_or(true);

    let include_current_project = config
        .as_ref()
        .and_then(|c| c.do_include_current_project)
        .unwrap_or(opts.include_current_project);
    if !include_current_project && dialect.is_sdk() {
        return Err(PackError::CurrentProjectRequired.into());
    }

    let assembly = match &opts.assembly {
        Some(path) => path.clone(),
        None => locate_assembly(&desc, dialect.as_ref(), opts)?,
    };
    let assembly_stem = assembly
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let nuspec_dir = match &opts.output_dir {
        Some(dir) => dir.clone(),
        None => assembly
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| desc.dir().to_path_buf()),
    };
    let nuspec_path = nuspec_dir.join(format!("{assembly_stem}.nuspec"));

    info!(
        project = %desc.name(),
        nuspec = %nuspec_path.display(),
        "creating nuspec"
    );

    let info = version_info::read_version_info(&assembly)
        .with_context(|| format!("failed to read version resource of {}", assembly.display()))?;

    let collected = collect(
        &desc,
        dialect.as_ref(),
        &CollectOptions {
            nuspec_dir: &nuspec_dir,
            profile: opts.profile,
            include_sources,
            include_current_project,
            add_framework_references,
            prerelease_override: opts.prerelease_override.as_deref(),
        },
    )?;

    let manifest = build_manifest(
        &desc,
        dialect.as_ref(),
        config.as_ref(),
        &assembly_stem,
        &info,
        opts.prerelease_override.as_deref(),
        collected,
    );

    fs::write_string(&nuspec_path, &manifest.to_xml()?)?;

    if opts.no_pack {
        return Ok(PackOutcome {
            nuspec_path,
            pack_output: None,
        });
    }

    let separate_symbols = config
        .as_ref()
        .map(PackConfig::separate_symbols)
        .unwrap_or(false);
    let pack_output = nuget::pack(&nuspec_path, separate_symbols)?;

    Ok(PackOutcome {
        nuspec_path,
        pack_output: Some(pack_output),
    })
}

/// Find the built assembly of `desc` in its resolved output folder.
pub fn locate_assembly(
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
    opts: &ProjectPackOptions,
) -> Result<PathBuf> {
    let frameworks = dialect.frameworks(desc);
    let framework = dialect.is_sdk().then(|| frameworks.first());
    let out = output::resolve_output_dir(
        desc,
        opts.profile,
        framework,
        opts.machine_bin.as_deref(),
    );

    let name = desc.assembly_name();
    ["dll", "exe"]
        .iter()
        .map(|ext| out.join(format!("{name}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            PackError::AssemblyNotFound {
                name,
                searched: out,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn options(project: PathBuf) -> ProjectPackOptions {
        ProjectPackOptions {
            project,
            assembly: None,
            profile: BuildProfile::Debug,
            no_pack: true,
            include_current_project: true,
            prerelease_override: None,
            machine_bin: None,
            output_dir: None,
        }
    }

    #[test]
    fn test_missing_project_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = pack_project(&options(tmp.path().join("Gone.csproj"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_sdk_project_rejects_framework_references() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Sdk.csproj");
        stdfs::write(
            &path,
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        )
        .unwrap();
        stdfs::write(
            tmp.path().join("NuGetPack.config"),
            "<NuGetPackConfig><AddFrameworkReferences>true</AddFrameworkReferences>\
             </NuGetPackConfig>",
        )
        .unwrap();

        let err = pack_project(&options(path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::FrameworkReferencesUnsupported)
        ));
    }

    #[test]
    fn test_sdk_project_must_include_current_project() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Sdk.csproj");
        stdfs::write(
            &path,
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        )
        .unwrap();

        let mut opts = options(path);
        opts.include_current_project = false;
        let err = pack_project(&opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::CurrentProjectRequired)
        ));
    }

    #[test]
    fn test_unbuilt_project_reports_searched_folder() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Sdk.csproj");
        stdfs::write(
            &path,
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        )
        .unwrap();

        let err = pack_project(&options(path)).unwrap_err();
        match err.downcast_ref::<PackError>() {
            Some(PackError::AssemblyNotFound { name, .. }) => assert_eq!(name, "Sdk"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
