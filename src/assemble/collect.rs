//! Element collection for one pack run.
//!
//! Collection walks the root project and its direct references and asks
//! the classifiers for every typed element the manifest could carry.
//! Nothing is filtered or merged here; reconciliation decides what
//! survives.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::classify::content::CONTENT_ROOTS;
use crate::classify::{binaries, content, references, sources};
use crate::core::element::{ElementKind, ManifestElement};
use crate::core::metadata::{self, package_version};
use crate::project::descriptor::ProjectDescriptor;
use crate::project::dialect::{detect, ProjectDialect};
use crate::project::graph::{self, ReferencedProject};
use crate::project::output::{self, BuildProfile};
use crate::util::version_info;

pub struct CollectOptions<'a> {
    /// Folder the nuspec will be written to; every file source is
    /// rendered relative to it.
    pub nuspec_dir: &'a Path,
    pub profile: BuildProfile,
    pub include_sources: bool,
    /// When false the project acts as a packaging umbrella: its own
    /// output stays out and every referenced project is embedded.
    pub include_current_project: bool,
    pub add_framework_references: bool,
    pub prerelease_override: Option<&'a str>,
}

pub struct CollectedElements {
    pub elements: Vec<ManifestElement>,
    /// Assembly names of embedded referenced projects, for the
    /// `references` section.
    pub embedded_assembly_names: Vec<String>,
}

/// Gather every candidate element for the manifest of `desc`.
pub fn collect(
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
    opts: &CollectOptions<'_>,
) -> Result<CollectedElements> {
    let mut elements = dialect.package_dependencies(desc)?;

    for &(root, kind) in CONTENT_ROOTS {
        let classified =
            content::content_elements(opts.nuspec_dir, desc, dialect, root, kind, false);
        if kind == ElementKind::ContentFile && dialect.is_sdk() {
            let extras = content::sdk_contentfiles_files(&classified);
            elements.extend(classified);
            elements.extend(extras);
        } else {
            elements.extend(classified);
        }
    }

    if dialect.is_sdk() || opts.include_current_project {
        collect_own_output(desc, dialect, opts, &mut elements);
    }

    if opts.add_framework_references {
        elements.extend(references::framework_reference_elements(desc));
    }

    let mut embedded_assembly_names = Vec::new();
    for reference in graph::referenced_projects(desc)? {
        // Umbrella packages embed everything they reference; otherwise
        // only projects without their own package are embedded.
        let embed = !opts.include_current_project || !reference.packageable;
        if embed {
            embed_reference(&reference, opts, &mut elements, &mut embedded_assembly_names)?;
        } else {
            let assembly = reference.descriptor.assembly_name();
            let id = metadata::package_name_from_assembly(&assembly);
            let version = internal_dependency_version(&reference.descriptor, opts);
            debug!(package = %id, %version, "internal package dependency");
            elements.push(ManifestElement::dependency(id, version));
        }
    }

    info!(
        elements = elements.len(),
        embedded = embedded_assembly_names.len(),
        "collected manifest elements"
    );
    Ok(CollectedElements {
        elements,
        embedded_assembly_names,
    })
}

fn collect_own_output(
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
    opts: &CollectOptions<'_>,
    elements: &mut Vec<ManifestElement>,
) {
    for framework in dialect.frameworks(desc).iter() {
        let out_fw = dialect.is_sdk().then_some(framework);
        let out = output::resolve_output_dir(desc, opts.profile, out_fw, Some(opts.nuspec_dir));
        elements.extend(binaries::binary_elements(
            opts.nuspec_dir,
            desc,
            &out,
            framework,
        ));
    }
    if opts.include_sources {
        elements.extend(sources::source_elements(opts.nuspec_dir, desc, dialect));
    }
}

fn embed_reference(
    reference: &ReferencedProject,
    opts: &CollectOptions<'_>,
    elements: &mut Vec<ManifestElement>,
    embedded_assembly_names: &mut Vec<String>,
) -> Result<()> {
    let desc = &reference.descriptor;
    let dialect = detect(desc);
    let assembly = desc.assembly_name();
    if assembly.starts_with('$') {
        // Template project with an unexpanded assembly name.
        debug!(project = %desc.name(), "skipping template reference");
        return Ok(());
    }

    for framework in dialect.frameworks(desc).iter() {
        let out_fw = dialect.is_sdk().then_some(framework);
        let out = output::resolve_output_dir(desc, opts.profile, out_fw, Some(opts.nuspec_dir));
        elements.extend(binaries::binary_elements(
            opts.nuspec_dir,
            desc,
            &out,
            framework,
        ));
    }
    if opts.include_sources {
        elements.extend(sources::source_elements(opts.nuspec_dir, desc, dialect.as_ref()));
    }
    elements.extend(dialect.package_dependencies(desc)?);
    embedded_assembly_names.push(assembly);
    Ok(())
}

/// Version an internal (packaged) project reference is depended on at.
///
/// Declared version properties win; otherwise the referenced project's
/// built assembly is inspected; a reference that was never built falls
/// back to `1.0.0`.
fn internal_dependency_version(desc: &ProjectDescriptor, opts: &CollectOptions<'_>) -> String {
    for property in ["Version", "FileVersion", "AssemblyVersion"] {
        if let Some(value) = desc.property(property) {
            return value.to_string();
        }
    }

    if let Some(assembly) = built_assembly(desc, opts.profile) {
        if let Ok(info) = version_info::read_version_info(&assembly) {
            return package_version(&info, opts.prerelease_override);
        }
    }

    "1.0.0".to_string()
}

fn built_assembly(desc: &ProjectDescriptor, profile: BuildProfile) -> Option<PathBuf> {
    let dialect = detect(desc);
    let frameworks = dialect.frameworks(desc);
    let framework = dialect.is_sdk().then(|| frameworks.first());
    let out = output::resolve_output_dir(desc, profile, framework, None);
    let assembly = desc.assembly_name();
    ["dll", "exe"]
        .iter()
        .map(|ext| out.join(format!("{assembly}.{ext}")))
        .find(|path| path.is_file())
}
