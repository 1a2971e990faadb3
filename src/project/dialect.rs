//! Project dialect detection.
//!
//! Three csproj dialects exist in the wild: the legacy MSBuild format
//! (explicit `Compile` items, xmlns on the root, `packages.config` for
//! dependencies), the SDK-style single-target format, and the SDK-style
//! multi-target format. The dialect decides where dependencies are
//! declared, how target frameworks are spelled, and which manifest
//! sections a project contributes to. It is detected once per project
//! and threaded through the rest of the pipeline as a trait object.

use anyhow::Result;

use crate::core::element::ManifestElement;
use crate::core::framework::{TargetFramework, TargetFrameworkSet};
use crate::project::descriptor::{ProjectDescriptor, XmlElement};
use crate::project::legacy::LegacyDialect;
use crate::project::sdk::{SdkMultiDialect, SdkSingleDialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    Legacy,
    SdkSingle,
    SdkMulti,
}

pub trait ProjectDialect {
    fn kind(&self) -> DialectKind;

    /// Frameworks this project builds for. Never empty: legacy projects
    /// without a `TargetFrameworkVersion` default to `net45`.
    fn frameworks(&self, desc: &ProjectDescriptor) -> TargetFrameworkSet;

    /// The `targetFramework` attribute value used on manifest dependency
    /// groups. Legacy manifests use the short moniker, SDK manifests the
    /// long framework name.
    fn group_attribute(&self, framework: &TargetFramework) -> String;

    /// Package dependencies declared by the project itself.
    fn package_dependencies(&self, desc: &ProjectDescriptor) -> Result<Vec<ManifestElement>>;

    /// Target-path override for a content or source item, when the
    /// project maps the file somewhere other than its on-disk location.
    fn content_target(&self, item: &XmlElement) -> Option<String>;

    /// Whether the project declares the named file as one of its items
    /// (legacy) or holds it in its folder (SDK, where items are implicit).
    fn contains_file(&self, desc: &ProjectDescriptor, file_name: &str) -> bool;

    /// Legacy manifests may carry `frameworkAssemblies`; requesting them
    /// for an SDK project is a configuration error.
    fn supports_framework_references(&self) -> bool {
        self.kind() == DialectKind::Legacy
    }

    fn is_sdk(&self) -> bool {
        self.kind() != DialectKind::Legacy
    }
}

/// Pick the dialect for a loaded project.
///
/// Detection keys on which framework property the project declares, not
/// on its value: a blank `<TargetFramework/>` is still an SDK project
/// (it gets the implicit `netstandard2.0` target).
pub fn detect(desc: &ProjectDescriptor) -> Box<dyn ProjectDialect> {
    if desc.declares_property("TargetFrameworks") {
        Box::new(SdkMultiDialect)
    } else if desc.declares_property("TargetFramework") {
        Box::new(SdkSingleDialect)
    } else {
        Box::new(LegacyDialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load(xml: &str) -> (TempDir, ProjectDescriptor) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Proj.csproj");
        fs::write(&path, xml).unwrap();
        let desc = ProjectDescriptor::load(&path).unwrap();
        (tmp, desc)
    }

    #[test]
    fn test_detects_multi_target() {
        let (_tmp, desc) = load(
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFrameworks>netstandard2.0;net462</TargetFrameworks>\
             </PropertyGroup></Project>",
        );
        assert_eq!(detect(&desc).kind(), DialectKind::SdkMulti);
    }

    #[test]
    fn test_detects_single_target() {
        let (_tmp, desc) = load(
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework>netstandard2.0</TargetFramework>\
             </PropertyGroup></Project>",
        );
        assert_eq!(detect(&desc).kind(), DialectKind::SdkSingle);
    }

    #[test]
    fn test_blank_target_framework_is_still_sdk() {
        let (_tmp, desc) = load(
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework></TargetFramework>\
             </PropertyGroup></Project>",
        );
        assert_eq!(detect(&desc).kind(), DialectKind::SdkSingle);
    }

    #[test]
    fn test_defaults_to_legacy() {
        let (_tmp, desc) = load(
            "<Project xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\
             <PropertyGroup><TargetFrameworkVersion>v4.6.2</TargetFrameworkVersion>\
             </PropertyGroup></Project>",
        );
        assert_eq!(detect(&desc).kind(), DialectKind::Legacy);
    }
}
