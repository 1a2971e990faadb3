//! SDK-style csproj dialects, single- and multi-target.
//!
//! SDK projects declare dependencies inline as `PackageReference` items
//! and include source files implicitly from the project folder. The two
//! variants differ only in how frameworks are spelled: `TargetFramework`
//! holds one moniker, `TargetFrameworks` a semicolon-separated list.

use anyhow::Result;

use crate::classify::dependencies;
use crate::core::element::ManifestElement;
use crate::core::framework::{TargetFramework, TargetFrameworkSet};
use crate::project::descriptor::{ProjectDescriptor, XmlElement};
use crate::project::dialect::{DialectKind, ProjectDialect};

/// Target an SDK project builds for when `TargetFramework` is declared
/// but left blank.
const DEFAULT_SDK_MONIKER: &str = "netstandard2.0";

pub struct SdkSingleDialect;

pub struct SdkMultiDialect;

impl ProjectDialect for SdkSingleDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::SdkSingle
    }

    fn frameworks(&self, desc: &ProjectDescriptor) -> TargetFrameworkSet {
        let moniker = desc.property("TargetFramework").unwrap_or(DEFAULT_SDK_MONIKER);
        TargetFrameworkSet::single(TargetFramework::from_moniker(moniker))
    }

    fn group_attribute(&self, framework: &TargetFramework) -> String {
        framework.long()
    }

    fn package_dependencies(&self, desc: &ProjectDescriptor) -> Result<Vec<ManifestElement>> {
        dependencies::package_reference_dependencies(desc)
    }

    fn content_target(&self, item: &XmlElement) -> Option<String> {
        sdk_content_target(item)
    }

    fn contains_file(&self, desc: &ProjectDescriptor, file_name: &str) -> bool {
        sdk_contains_file(desc, file_name)
    }
}

impl ProjectDialect for SdkMultiDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::SdkMulti
    }

    fn frameworks(&self, desc: &ProjectDescriptor) -> TargetFrameworkSet {
        let list = desc.property("TargetFrameworks").unwrap_or_default();
        let set = TargetFrameworkSet::from_list(list);
        if set.is_empty() {
            TargetFrameworkSet::single(TargetFramework::from_moniker(DEFAULT_SDK_MONIKER))
        } else {
            set
        }
    }

    fn group_attribute(&self, framework: &TargetFramework) -> String {
        framework.long()
    }

    fn package_dependencies(&self, desc: &ProjectDescriptor) -> Result<Vec<ManifestElement>> {
        dependencies::package_reference_dependencies(desc)
    }

    fn content_target(&self, item: &XmlElement) -> Option<String> {
        sdk_content_target(item)
    }

    fn contains_file(&self, desc: &ProjectDescriptor, file_name: &str) -> bool {
        sdk_contains_file(desc, file_name)
    }
}

fn sdk_content_target(item: &XmlElement) -> Option<String> {
    item.attr("Link")
        .map(str::to_string)
        .filter(|t| !t.is_empty())
}

// SDK items are implicit: membership means "the file sits in the project
// folder", unless an explicit `<None Remove=...>` opts it out.
fn sdk_contains_file(desc: &ProjectDescriptor, file_name: &str) -> bool {
    let removed = desc.items("None").any(|item| {
        item.attr("Remove")
            .is_some_and(|remove| remove.eq_ignore_ascii_case(file_name))
    });
    if removed {
        return false;
    }
    match std::fs::read_dir(desc.dir()) {
        Ok(entries) => entries.flatten().any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(file_name)
        }),
        Err(_) => false,
    }
}
