//! One-hop project reference resolution.
//!
//! Packing a project pulls in its direct `ProjectReference`s only.
//! Each referenced project is either packaged in its own right (it
//! carries a per-project pack configuration file, so we depend on its
//! package) or it is embedded (its binaries and content ship inside the
//! current package). Transitive references are the referenced package's
//! own business.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::core::pack_config;
use crate::project::descriptor::ProjectDescriptor;

#[derive(Debug)]
pub struct ReferencedProject {
    pub descriptor: ProjectDescriptor,
    /// True when the referenced project publishes its own package, in
    /// which case it is reconciled into a dependency rather than having
    /// its output embedded.
    pub packageable: bool,
}

impl ReferencedProject {
    pub fn dir(&self) -> &Path {
        self.descriptor.dir()
    }
}

/// Load every direct project reference of `desc`.
///
/// Reference paths with unexpanded MSBuild variables (`$(...)`) cannot
/// be resolved from the project file alone and are skipped.
pub fn referenced_projects(desc: &ProjectDescriptor) -> Result<Vec<ReferencedProject>> {
    let mut projects = Vec::new();
    for item in desc.items("ProjectReference") {
        let Some(include) = item.attr("Include") else {
            continue;
        };
        if include.contains('$') {
            debug!(reference = include, "skipping unexpanded project reference");
            continue;
        }
        let path = resolve_reference(desc.dir(), include);
        let descriptor = ProjectDescriptor::load(&path)?;
        let packageable = pack_config::find_config_file(descriptor.dir()).is_some();
        debug!(
            project = %descriptor.name(),
            packageable,
            "resolved project reference"
        );
        projects.push(ReferencedProject {
            descriptor,
            packageable,
        });
    }
    Ok(projects)
}

fn resolve_reference(base_dir: &Path, include: &str) -> PathBuf {
    let relative = include.replace('\\', "/");
    let mut path = base_dir.to_path_buf();
    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                path.pop();
            }
            other => path.push(other),
        }
    }
    path
}
