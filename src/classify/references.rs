//! Assembly reference classification.
//!
//! Two reference flavors end up in a manifest. Framework assemblies
//! (`Reference` items without a `HintPath`, i.e. resolved from the GAC)
//! become `frameworkAssembly` entries when the package opts in. Embedded
//! referenced projects become explicit `reference` entries so consumers
//! compile against the main assembly only.

use crate::core::element::ManifestElement;
use crate::project::descriptor::ProjectDescriptor;

/// Framework-assembly references of a legacy project.
pub fn framework_reference_elements(desc: &ProjectDescriptor) -> Vec<ManifestElement> {
    desc.items("Reference")
        .filter(|item| item.first("HintPath").is_none())
        .filter_map(|item| item.attr("Include"))
        .map(ManifestElement::framework_reference)
        .collect()
}

/// Explicit `reference` file names for embedded project assemblies.
pub fn reference_file_names(embedded_assembly_names: &[String]) -> Vec<String> {
    embedded_assembly_names
        .iter()
        .map(|name| format!("{name}.dll"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::ElementPayload;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_gac_references_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Legacy.csproj");
        fs::write(
            &path,
            "<Project xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\
             <ItemGroup>\
             <Reference Include=\"System.Speech\" />\
             <Reference Include=\"Newtonsoft.Json\">\
             <HintPath>..\\packages\\Newtonsoft.Json.13.0.1\\lib\\net45\\Newtonsoft.Json.dll</HintPath>\
             </Reference>\
             </ItemGroup></Project>",
        )
        .unwrap();
        let desc = ProjectDescriptor::load(&path).unwrap();

        let refs = framework_reference_elements(&desc);
        assert_eq!(refs.len(), 1);
        match &refs[0].payload {
            ElementPayload::FrameworkReference(fr) => {
                assert_eq!(fr.assembly_name, "System.Speech");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_reference_file_names() {
        let names = vec!["Acme.Core".to_string(), "Acme.Util".to_string()];
        assert_eq!(
            reference_file_names(&names),
            vec!["Acme.Core.dll", "Acme.Util.dll"]
        );
    }
}
