//! Build output location resolution.
//!
//! Legacy projects declare configuration-scoped `OutputPath` properties;
//! SDK-style projects usually do not, so their output folder is
//! synthesized from `bin/<config>/<moniker>`. Either way the result must
//! actually hold binaries before it is trusted: SDK tooling does not
//! always honor the requested configuration label, and build servers lay
//! projects out differently than local workspaces.

use std::path::{Path, PathBuf};

use crate::core::framework::TargetFramework;
use crate::project::descriptor::ProjectDescriptor;
use crate::util::fs;

/// Requested build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    /// The configuration substring used in `Condition` attributes,
    /// e.g. `Debug|AnyCPU`.
    pub fn condition_label(self) -> &'static str {
        match self {
            BuildProfile::Debug => "Debug|AnyCPU",
            BuildProfile::Release => "Release|AnyCPU",
        }
    }

    /// Folder name used in synthesized output paths.
    pub fn folder(self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }

    pub fn opposite(self) -> BuildProfile {
        match self {
            BuildProfile::Debug => BuildProfile::Release,
            BuildProfile::Release => BuildProfile::Debug,
        }
    }
}

/// An `OutputPath` declared under a property group whose condition
/// matches the requested configuration.
pub fn declared_output_dir(desc: &ProjectDescriptor, profile: BuildProfile) -> Option<PathBuf> {
    desc.property_groups()
        .filter(|pg| {
            pg.attr("Condition")
                .is_some_and(|c| c.contains(profile.condition_label()))
        })
        .filter_map(|pg| pg.first("OutputPath"))
        .map(|el| el.text())
        .find(|v| !v.is_empty())
        .map(|v| desc.dir().join(v.replace('\\', "/")))
}

/// Resolve the directory holding a project's build output.
///
/// Declared output paths win. Otherwise the path is synthesized as
/// `bin/<config>[/<moniker>]`; when that folder holds no binaries the
/// opposite configuration folder is tried. A result that still fails the
/// "exists and contains a binary" check is replaced with the fallback
/// directory, when one was supplied.
pub fn resolve_output_dir(
    desc: &ProjectDescriptor,
    profile: BuildProfile,
    framework: Option<&TargetFramework>,
    fallback: Option<&Path>,
) -> PathBuf {
    let path = match declared_output_dir(desc, profile) {
        Some(declared) => declared,
        None => {
            let synthesized = synthesized_dir(desc, profile, framework);
            if fs::contains_binaries(&synthesized) {
                synthesized
            } else {
                let opposite = synthesized_dir(desc, profile.opposite(), framework);
                if fs::contains_binaries(&opposite) {
                    opposite
                } else {
                    synthesized
                }
            }
        }
    };

    match fallback {
        Some(fallback) if !fs::contains_binaries(&path) => fallback.to_path_buf(),
        _ => path,
    }
}

fn synthesized_dir(
    desc: &ProjectDescriptor,
    profile: BuildProfile,
    framework: Option<&TargetFramework>,
) -> PathBuf {
    let mut dir = desc.dir().join("bin").join(profile.folder());
    if let Some(framework) = framework {
        dir.push(framework.short());
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn legacy_project(dir: &Path) -> ProjectDescriptor {
        let path = dir.join("Legacy.csproj");
        stdfs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <OutputPath>bin\Debug\</OutputPath>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">
    <OutputPath>bin\Release\</OutputPath>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();
        ProjectDescriptor::load(&path).unwrap()
    }

    fn sdk_project(dir: &Path) -> ProjectDescriptor {
        let path = dir.join("Sdk.csproj");
        stdfs::write(
            &path,
            r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>netstandard2.0</TargetFramework>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();
        ProjectDescriptor::load(&path).unwrap()
    }

    #[test]
    fn test_declared_path_is_scoped_by_condition() {
        let tmp = TempDir::new().unwrap();
        let desc = legacy_project(tmp.path());
        assert_eq!(
            declared_output_dir(&desc, BuildProfile::Debug).unwrap(),
            tmp.path().join("bin/Debug/")
        );
        assert_eq!(
            declared_output_dir(&desc, BuildProfile::Release).unwrap(),
            tmp.path().join("bin/Release/")
        );
    }

    #[test]
    fn test_sdk_synthesizes_bin_config_moniker() {
        let tmp = TempDir::new().unwrap();
        let desc = sdk_project(tmp.path());
        let out = tmp.path().join("bin/debug/netstandard2.0");
        stdfs::create_dir_all(&out).unwrap();
        stdfs::write(out.join("Sdk.dll"), "bin").unwrap();

        let fw = TargetFramework::from_moniker("netstandard2.0");
        let resolved = resolve_output_dir(&desc, BuildProfile::Debug, Some(&fw), None);
        assert_eq!(resolved, out);
    }

    #[test]
    fn test_opposite_configuration_is_tried() {
        let tmp = TempDir::new().unwrap();
        let desc = sdk_project(tmp.path());
        // Only the release folder was actually built.
        let release = tmp.path().join("bin/release/netstandard2.0");
        stdfs::create_dir_all(&release).unwrap();
        stdfs::write(release.join("Sdk.dll"), "bin").unwrap();

        let fw = TargetFramework::from_moniker("netstandard2.0");
        let resolved = resolve_output_dir(&desc, BuildProfile::Debug, Some(&fw), None);
        assert_eq!(resolved, release);
    }

    #[test]
    fn test_fallback_replaces_empty_output() {
        let tmp = TempDir::new().unwrap();
        let desc = sdk_project(tmp.path());
        let machine_bin = tmp.path().join("build-server-bin");
        stdfs::create_dir_all(&machine_bin).unwrap();
        stdfs::write(machine_bin.join("Sdk.dll"), "bin").unwrap();

        let fw = TargetFramework::from_moniker("netstandard2.0");
        let resolved = resolve_output_dir(&desc, BuildProfile::Debug, Some(&fw), Some(&machine_bin));
        assert_eq!(resolved, machine_bin);
    }
}
