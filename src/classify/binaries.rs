//! Binary artifact classification.
//!
//! A project's packaged binaries are the files in its build output
//! folder named `<AssemblyName>.<ext>`: the assembly itself plus its
//! single-extension companions (`.pdb`, `.xml`, `.config`). Satellite
//! files with dotted suffixes and previously packed `.nuspec`/`.nupkg`
//! leftovers stay out.

use std::path::Path;

use tracing::debug;

use crate::core::element::{ElementKind, ManifestElement};
use crate::core::framework::TargetFramework;
use crate::project::descriptor::ProjectDescriptor;
use crate::util::fs;

/// Classify the build output of `desc` found in `output_dir` into
/// `lib/<moniker>` entries, with sources relative to the nuspec folder.
pub fn binary_elements(
    nuspec_dir: &Path,
    desc: &ProjectDescriptor,
    output_dir: &Path,
    framework: &TargetFramework,
) -> Vec<ManifestElement> {
    let assembly_name = desc.assembly_name();
    let lib_dir = format!("lib/{}", framework.short());

    let files = fs::list_files(output_dir);
    debug!(
        assembly = %assembly_name,
        output = %output_dir.display(),
        candidates = files.len(),
        "classifying binaries"
    );

    files
        .into_iter()
        .filter(|file| is_assembly_artifact(&assembly_name, file))
        .map(|file| {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ManifestElement::file(
                ElementKind::LibraryFile,
                fs::relative_to(&file, nuspec_dir),
                format!("{lib_dir}/{name}"),
            )
        })
        .collect()
}

/// `<assembly>.<single-extension>`, excluding packaging leftovers.
fn is_assembly_artifact(assembly_name: &str, file: &Path) -> bool {
    let Some(name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return false;
    };
    if name.ends_with(".nuspec") || name.ends_with(".nupkg") {
        return false;
    }
    let Some(suffix) = name.strip_prefix(assembly_name) else {
        return false;
    };
    let Some(extension) = suffix.strip_prefix('.') else {
        return false;
    };
    !extension.is_empty() && !extension.contains('.')
}
