//! Source file classification for symbol packages.
//!
//! Source files ship under `src/<ProjectName>/...` so debuggers can
//! resolve symbols against them. Legacy projects declare every source
//! file as a `Compile` item; SDK projects include sources implicitly, so
//! their folder is walked instead.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::element::{ElementKind, ManifestElement};
use crate::project::descriptor::ProjectDescriptor;
use crate::project::dialect::ProjectDialect;
use crate::util::fs;

/// Folders under an SDK project that never hold shippable sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

pub fn source_elements(
    nuspec_dir: &Path,
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
) -> Vec<ManifestElement> {
    if dialect.is_sdk() {
        sdk_sources(nuspec_dir, desc)
    } else {
        legacy_sources(nuspec_dir, desc)
    }
}

// Compile items only. Paths pointing above the project folder are links
// into sibling projects and are not this package's sources.
fn legacy_sources(nuspec_dir: &Path, desc: &ProjectDescriptor) -> Vec<ManifestElement> {
    let project_name = desc.name();
    desc.items("Compile")
        .filter_map(|item| item.attr("Include"))
        .filter(|include| !include.starts_with(".."))
        .map(|include| {
            let relative = include.replace('\\', "/");
            ManifestElement::file(
                ElementKind::SourceFile,
                fs::join_slash(&fs::relative_to(desc.dir(), nuspec_dir), &relative),
                format!("src/{project_name}/{relative}"),
            )
        })
        .collect()
}

fn sdk_sources(nuspec_dir: &Path, desc: &ProjectDescriptor) -> Vec<ManifestElement> {
    let project_name = desc.name();
    let mut elements = Vec::new();
    let walk = WalkDir::new(desc.dir())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !entry.file_type().is_dir()
                || !SKIPPED_DIRS
                    .iter()
                    .any(|skip| entry.file_name().to_string_lossy().eq_ignore_ascii_case(skip))
        });
    for entry in walk.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("cs") {
            continue;
        }
        let relative = fs::relative_to(path, desc.dir());
        elements.push(ManifestElement::file(
            ElementKind::SourceFile,
            fs::relative_to(path, nuspec_dir),
            format!("src/{project_name}/{relative}"),
        ));
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::dialect;
    use std::fs as stdfs;
    use tempfile::TempDir;

    #[test]
    fn test_legacy_compile_items_exclude_upward_paths() {
        let tmp = TempDir::new().unwrap();
        let proj_dir = tmp.path().join("Acme.Core");
        stdfs::create_dir_all(&proj_dir).unwrap();
        let path = proj_dir.join("Acme.Core.csproj");
        stdfs::write(
            &path,
            "<Project xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\
             <ItemGroup>\
             <Compile Include=\"Logic\\Engine.cs\" />\
             <Compile Include=\"..\\Shared\\Linked.cs\" />\
             </ItemGroup></Project>",
        )
        .unwrap();
        let desc = ProjectDescriptor::load(&path).unwrap();
        let dialect = dialect::detect(&desc);

        let elements = source_elements(&proj_dir, &desc, dialect.as_ref());
        assert_eq!(elements.len(), 1);
        let file = elements[0].as_file().unwrap();
        assert_eq!(file.source, "Logic/Engine.cs");
        assert_eq!(file.target, "src/Acme.Core/Logic/Engine.cs");
    }

    #[test]
    fn test_sdk_sources_walk_folder_skipping_bin_obj() {
        let tmp = TempDir::new().unwrap();
        let proj_dir = tmp.path().join("Acme.Core");
        stdfs::create_dir_all(proj_dir.join("Logic")).unwrap();
        stdfs::create_dir_all(proj_dir.join("bin/Debug")).unwrap();
        stdfs::create_dir_all(proj_dir.join("obj")).unwrap();
        let path = proj_dir.join("Acme.Core.csproj");
        stdfs::write(
            &path,
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
             <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        )
        .unwrap();
        stdfs::write(proj_dir.join("Logic/Engine.cs"), "class Engine {}").unwrap();
        stdfs::write(proj_dir.join("bin/Debug/Gen.cs"), "generated").unwrap();
        stdfs::write(proj_dir.join("obj/Asm.cs"), "generated").unwrap();
        stdfs::write(proj_dir.join("readme.md"), "docs").unwrap();

        let desc = ProjectDescriptor::load(&path).unwrap();
        let dialect = dialect::detect(&desc);

        let elements = source_elements(&proj_dir, &desc, dialect.as_ref());
        assert_eq!(elements.len(), 1);
        assert_eq!(
            elements[0].as_file().unwrap().target,
            "src/Acme.Core/Logic/Engine.cs"
        );
    }
}
