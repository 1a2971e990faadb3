//! Legacy (pre-SDK) csproj dialect.
//!
//! Legacy projects enumerate every file as an explicit item, spell their
//! framework as a `TargetFrameworkVersion` (`v4.5`), and keep package
//! dependencies out-of-band in `packages.config`.

use anyhow::Result;

use crate::classify::dependencies::{self, INTERNAL_PACKAGES_CONFIG, PACKAGES_CONFIG};
use crate::core::element::ManifestElement;
use crate::core::framework::{TargetFramework, TargetFrameworkSet};
use crate::project::descriptor::{ProjectDescriptor, XmlElement};
use crate::project::dialect::{DialectKind, ProjectDialect};

/// Item kinds a legacy project uses to declare files.
const FILE_ITEMS: &[&str] = &["Compile", "Content", "None", "EmbeddedResource"];

pub struct LegacyDialect;

impl ProjectDialect for LegacyDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Legacy
    }

    fn frameworks(&self, desc: &ProjectDescriptor) -> TargetFrameworkSet {
        let version = desc.property("TargetFrameworkVersion").unwrap_or("v4.5");
        TargetFrameworkSet::single(TargetFramework::from_legacy_version(version))
    }

    fn group_attribute(&self, framework: &TargetFramework) -> String {
        framework.short().to_string()
    }

    fn package_dependencies(&self, desc: &ProjectDescriptor) -> Result<Vec<ManifestElement>> {
        let mut deps = Vec::new();
        for name in [PACKAGES_CONFIG, INTERNAL_PACKAGES_CONFIG] {
            let path = desc.dir().join(name);
            if path.is_file() {
                deps.extend(dependencies::packages_config_dependencies(&path)?);
            }
        }
        Ok(deps)
    }

    fn content_target(&self, item: &XmlElement) -> Option<String> {
        item.first("Link")
            .map(|link| link.text().to_string())
            .filter(|t| !t.is_empty())
    }

    fn contains_file(&self, desc: &ProjectDescriptor, file_name: &str) -> bool {
        FILE_ITEMS.iter().any(|kind| {
            desc.items(kind).any(|item| {
                item.attr("Include")
                    .is_some_and(|include| include.eq_ignore_ascii_case(file_name))
            })
        })
    }
}
