//! Implementation of `nupack solution`.
//!
//! Walks a solution folder for packageable projects (folders carrying a
//! companion config file) and packs each one. Projects are independent,
//! so they are packed in parallel.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::pack_config;
use crate::error::PackError;
use crate::ops::pack_project::{pack_project, PackOutcome, ProjectPackOptions};
use crate::project::descriptor::ProjectDescriptor;
use crate::project::output::BuildProfile;

/// Options for packing every packageable project under a solution folder.
#[derive(Debug, Clone)]
pub struct SolutionPackOptions {
    pub solution_dir: PathBuf,
    /// Build-server binaries folder passed through to each project.
    pub bin_folder: Option<PathBuf>,
    pub profile: BuildProfile,
    pub no_pack: bool,
    pub include_current_project: bool,
    pub prerelease_override: Option<String>,
}

pub fn pack_solution(opts: &SolutionPackOptions) -> Result<Vec<PackOutcome>> {
    let projects = find_packageable_projects(&opts.solution_dir)?;
    info!(
        solution = %opts.solution_dir.display(),
        projects = projects.len(),
        "packing solution"
    );

    let outcomes: Vec<Option<PackOutcome>> = projects
        .par_iter()
        .map(|project| {
            if is_template_project(project)? {
                debug!(project = %project.display(), "skipping template project");
                return Ok(None);
            }
            pack_project(&ProjectPackOptions {
                project: project.clone(),
                assembly: None,
                profile: opts.profile,
                no_pack: opts.no_pack,
                include_current_project: opts.include_current_project,
                prerelease_override: opts.prerelease_override.clone(),
                machine_bin: opts.bin_folder.clone(),
                // The build-server bin folder also receives the nuspec.
                output_dir: opts.bin_folder.clone(),
            })
            .map(Some)
        })
        .collect::<Result<_>>()?;
    Ok(outcomes.into_iter().flatten().collect())
}

// Project templates carry unexpanded `$(...)` assembly names and cannot
// be packed.
fn is_template_project(project: &Path) -> Result<bool> {
    let desc = ProjectDescriptor::load(project)?;
    Ok(desc.assembly_name().starts_with('$'))
}

/// Folders holding a companion config file must hold exactly one project.
pub fn find_packageable_projects(solution_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut projects = Vec::new();
    for entry in WalkDir::new(solution_dir)
        .sort_by_file_name()
        .into_iter()
        .flatten()
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        if pack_config::find_config_file(dir).is_none() {
            continue;
        }
        let candidates = project_files(dir);
        match candidates.len() {
            0 => debug!(folder = %dir.display(), "config file without a project"),
            1 => projects.push(candidates.into_iter().next().unwrap_or_default()),
            _ => return Err(PackError::AmbiguousProjectFolder(dir.to_path_buf()).into()),
        }
    }
    Ok(projects)
}

fn project_files(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("csproj") | Some("vbproj")
            )
        })
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn packageable(dir: &Path, name: &str) {
        stdfs::create_dir_all(dir).unwrap();
        stdfs::write(dir.join(format!("{name}.csproj")), "<Project />").unwrap();
        stdfs::write(dir.join("NuGetPack.config"), "<NuGetPackConfig />").unwrap();
    }

    #[test]
    fn test_discovers_only_config_carrying_folders() {
        let tmp = TempDir::new().unwrap();
        packageable(&tmp.path().join("Acme.Core"), "Acme.Core");
        packageable(&tmp.path().join("nested/Acme.Util"), "Acme.Util");
        stdfs::create_dir_all(tmp.path().join("Acme.Tests")).unwrap();
        stdfs::write(
            tmp.path().join("Acme.Tests/Acme.Tests.csproj"),
            "<Project />",
        )
        .unwrap();

        let projects = find_packageable_projects(tmp.path()).unwrap();
        let names: Vec<_> = projects
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Acme.Core.csproj", "Acme.Util.csproj"]);
    }

    #[test]
    fn test_two_projects_in_one_folder_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Acme.Core");
        packageable(&dir, "Acme.Core");
        stdfs::write(dir.join("Acme.Core.Legacy.csproj"), "<Project />").unwrap();

        let err = find_packageable_projects(tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::AmbiguousProjectFolder(_))
        ));
    }
}
