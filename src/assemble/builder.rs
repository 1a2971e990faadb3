//! Manifest assembly.
//!
//! Takes the collected elements plus the root project's identity and
//! produces the final `Manifest`: metadata from the version resource and
//! companion config, reconciled dependency groups, and the dialect-gated
//! optional sections.

use crate::assemble::collect::CollectedElements;
use crate::assemble::reconcile;
use crate::classify::{content, references};
use crate::core::element::{ElementKind, ElementPayload};
use crate::core::manifest::Manifest;
use crate::core::metadata::{
    package_name_from_assembly, package_version, AssemblyVersionInfo, PackageMetadata,
};
use crate::core::pack_config::PackConfig;
use crate::project::descriptor::ProjectDescriptor;
use crate::project::dialect::{DialectKind, ProjectDialect};

pub fn build_manifest(
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
    config: Option<&PackConfig>,
    assembly_stem: &str,
    info: &AssemblyVersionInfo,
    prerelease_override: Option<&str>,
    collected: CollectedElements,
) -> Manifest {
    let package_name = package_name_from_assembly(assembly_stem);
    let version = package_version(info, prerelease_override);
    let metadata = PackageMetadata::from_version_info(&package_name, version, info, config);

    let elements = reconcile::drop_excluded_targets(collected.elements);

    let mut dependencies = Vec::new();
    let mut framework_assemblies = Vec::new();
    let mut content_elements = Vec::new();
    let mut files = Vec::new();
    for element in &elements {
        match &element.payload {
            ElementPayload::Dependency(dep) => dependencies.push(dep.clone()),
            ElementPayload::FrameworkReference(fr) => {
                framework_assemblies.push(fr.assembly_name.clone());
            }
            ElementPayload::File(file) => {
                if element.kind == ElementKind::ContentFile {
                    content_elements.push(element.clone());
                }
                files.push(file.clone());
            }
        }
    }

    let dependencies = reconcile::dedupe_dependencies(dependencies);
    let frameworks = dialect.frameworks(desc);
    let dependency_groups = reconcile::group_dependencies(&dependencies, &frameworks, dialect);

    let (references, content_files) = if dialect.is_sdk() {
        let mut names = references::reference_file_names(&collected.embedded_assembly_names);
        // Multi-target packages list their own assembly alongside the
        // embedded ones, but only when the group exists at all.
        if dialect.kind() == DialectKind::SdkMulti && !names.is_empty() {
            names.push(format!("{}.dll", desc.assembly_name()));
        }
        (names, content::sdk_contentfiles_metadata(&content_elements))
    } else {
        (Vec::new(), Vec::new())
    };

    Manifest {
        metadata,
        dependency_groups,
        framework_assemblies,
        references,
        content_files,
        files,
    }
}
