//! Package dependency extraction.
//!
//! Legacy projects list dependencies in `packages.config` (and its
//! internal-feed sibling). SDK projects declare them inline as
//! `PackageReference` items, optionally scoped to one framework via an
//! item-group `Condition`.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::core::element::{DependencyEntry, ManifestElement};
use crate::core::framework::TargetFramework;
use crate::error::PackError;
use crate::project::descriptor::ProjectDescriptor;
use crate::util::fs;

pub const PACKAGES_CONFIG: &str = "packages.config";
pub const INTERNAL_PACKAGES_CONFIG: &str = "internalPackages.config";

/// NuGet restores build assets for inline references itself, so packages
/// produced from SDK projects always exclude them for consumers.
const SDK_DEPENDENCY_EXCLUDE: &str = "Build,Analyzers";

#[derive(Debug, Deserialize)]
struct PackagesFile {
    #[serde(rename = "package", default)]
    packages: Vec<PackageEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@version")]
    version: String,
}

/// Read the dependencies declared in a `packages.config` file.
pub fn packages_config_dependencies(path: &Path) -> Result<Vec<ManifestElement>> {
    let text = fs::read_to_string(path)?;
    let parsed: PackagesFile =
        quick_xml::de::from_str(&text).map_err(|err| PackError::ProjectParse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    Ok(parsed
        .packages
        .into_iter()
        .map(|p| ManifestElement::dependency(&p.id, &p.version))
        .collect())
}

/// Read the `PackageReference` dependencies of an SDK project.
///
/// References under a conditioned `ItemGroup` are scoped to the framework
/// named by the condition; the rest apply to every target framework.
pub fn package_reference_dependencies(desc: &ProjectDescriptor) -> Result<Vec<ManifestElement>> {
    let mut deps = Vec::new();
    for group in desc.item_groups() {
        let scope = group.attr("Condition").and_then(condition_framework);
        for item in group.elements("PackageReference") {
            let Some(id) = item.attr("Include") else {
                continue;
            };
            let version = item
                .attr("Version")
                .map(str::to_string)
                .or_else(|| item.first("Version").map(|v| v.text().to_string()))
                .unwrap_or_default();
            if version.is_empty() {
                continue;
            }
            deps.push(ManifestElement::dependency_full(DependencyEntry {
                id: id.to_string(),
                version,
                exclude: Some(SDK_DEPENDENCY_EXCLUDE.to_string()),
                framework: scope.clone(),
            }));
        }
    }
    Ok(deps)
}

/// Extract the framework moniker from a condition such as
/// `'$(TargetFramework)' == 'net462'`. Returns the normalized short form.
fn condition_framework(condition: &str) -> Option<String> {
    let (_, rhs) = condition.split_once("==")?;
    let moniker = rhs.trim().trim_matches('\'').trim();
    if moniker.is_empty() {
        return None;
    }
    Some(TargetFramework::from_moniker(moniker).short().to_string())
}
