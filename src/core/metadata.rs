//! Package identity and descriptive metadata.
//!
//! Metadata is sourced from the compiled assembly's version resource, with
//! each field independently overridable by the companion
//! `NuGetPack.config`. Assembled once per manifest build and never mutated
//! afterwards.

use crate::core::pack_config::PackConfig;

/// Default icon shown for packages that do not configure one.
pub const DEFAULT_ICON_URL: &str =
    "https://nuget.org/Content/Images/packageDefaultIcon-50x50.png";

/// The fields of a PE version resource this tool consumes.
///
/// Kept as a plain value so the whole pipeline is testable without real
/// PE files; `util::version_info` produces it from a built assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyVersionInfo {
    /// FileVersion quad (major, minor, build, private).
    pub file_version: (u16, u16, u16, u16),
    /// Free-text ProductVersion, which may carry a `-suffix` pre-release
    /// label.
    pub product_version: String,
    /// CompanyName.
    pub company: String,
    /// Comments (used for description and summary).
    pub comments: String,
    /// LegalCopyright.
    pub copyright: String,
    /// SpecialBuild (used for release notes).
    pub special_build: String,
    /// FileDescription (used for tags).
    pub file_description: String,
    /// LegalTrademarks (used for project and license urls).
    pub trademarks: String,
}

/// Resolve the package version string from a version resource.
///
/// The base is `major.minor.build`, with the fourth segment appended only
/// when nonzero. With no override, a `-suffix` in the ProductVersion
/// becomes the pre-release label (an empty suffix after the dash defaults
/// to the literal `PreRelease`). An override replaces the label entirely;
/// an explicit empty override suppresses it.
pub fn package_version(info: &AssemblyVersionInfo, prerelease_override: Option<&str>) -> String {
    let (major, minor, build, private) = info.file_version;

    let mut version = format!("{major}.{minor}.{build}");
    if private != 0 {
        version.push_str(&format!(".{private}"));
    }

    match prerelease_override {
        None => {
            if let Some((_, suffix)) = info.product_version.split_once('-') {
                let label = if suffix.trim().is_empty() {
                    "PreRelease"
                } else {
                    suffix
                };
                version.push('-');
                version.push_str(label);
            }
        }
        Some("") => {}
        Some(label) => {
            version.push('-');
            version.push_str(label);
        }
    }

    version
}

/// Package identity and descriptive metadata for one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub id: String,
    pub version: String,
    pub title: String,
    pub authors: String,
    pub owners: String,
    pub description: String,
    pub release_notes: String,
    pub summary: String,
    pub project_url: String,
    pub icon_url: String,
    pub license_url: String,
    pub copyright: String,
    pub tags: String,
}

impl PackageMetadata {
    /// Source every descriptive field from the version resource, then
    /// apply the companion-config overrides field by field.
    pub fn from_version_info(
        package_name: &str,
        version: String,
        info: &AssemblyVersionInfo,
        config: Option<&PackConfig>,
    ) -> Self {
        let mut metadata = PackageMetadata {
            id: package_name.to_string(),
            version,
            title: package_name.to_string(),
            authors: info.company.clone(),
            owners: info.company.clone(),
            description: info.comments.clone(),
            release_notes: info.special_build.clone(),
            summary: info.comments.clone(),
            project_url: info.trademarks.clone(),
            icon_url: DEFAULT_ICON_URL.to_string(),
            license_url: info.trademarks.clone(),
            copyright: info.copyright.clone(),
            tags: info.file_description.clone(),
        };

        if let Some(config) = config {
            apply_override(&mut metadata.authors, config.authors.as_deref());
            apply_override(&mut metadata.owners, config.owners.as_deref());
            apply_override(&mut metadata.description, config.description.as_deref());
            apply_override(&mut metadata.summary, config.summary.as_deref());
            apply_override(&mut metadata.project_url, config.project_url.as_deref());
            apply_override(&mut metadata.icon_url, config.icon_url.as_deref());
            apply_override(&mut metadata.license_url, config.license_url.as_deref());
            apply_override(&mut metadata.copyright, config.copyright.as_deref());
            apply_override(&mut metadata.tags, config.keywords.as_deref());
        }

        metadata
    }
}

fn apply_override(field: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *field = value.to_string();
        }
    }
}

/// Strip the `.nuget` marker from an assembly stem to get the package
/// name. Legacy NuGet-definition projects name their assembly
/// `<Package>.NuGet` so the companion project and the real package can
/// coexist in one solution.
pub fn package_name_from_assembly(assembly_stem: &str) -> String {
    const NUGET_SUFFIX: &str = ".nuget";
    let lower = assembly_stem.to_ascii_lowercase();
    if lower.ends_with(NUGET_SUFFIX) {
        assembly_stem[..assembly_stem.len() - NUGET_SUFFIX.len()].to_string()
    } else {
        assembly_stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(quad: (u16, u16, u16, u16), product: &str) -> AssemblyVersionInfo {
        AssemblyVersionInfo {
            file_version: quad,
            product_version: product.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_version_without_private_part() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2"), None);
        assert_eq!(v, "1.3.2");
    }

    #[test]
    fn test_version_with_private_part() {
        let v = package_version(&info((1, 3, 2, 7), "1.3.2.7"), None);
        assert_eq!(v, "1.3.2.7");
    }

    #[test]
    fn test_empty_embedded_suffix_defaults_to_prerelease() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2-"), None);
        assert_eq!(v, "1.3.2-PreRelease");
    }

    #[test]
    fn test_embedded_suffix_is_preserved() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2-alpha102"), None);
        assert_eq!(v, "1.3.2-alpha102");
    }

    #[test]
    fn test_multi_dash_suffix_is_kept_whole() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2-alpha-hotfix"), None);
        assert_eq!(v, "1.3.2-alpha-hotfix");
    }

    #[test]
    fn test_override_replaces_embedded_suffix() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2-alpha102"), Some("rc1"));
        assert_eq!(v, "1.3.2-rc1");
    }

    #[test]
    fn test_empty_override_suppresses_suffix() {
        let v = package_version(&info((1, 3, 2, 0), "1.3.2-alpha102"), Some(""));
        assert_eq!(v, "1.3.2");
    }

    #[test]
    fn test_package_name_strips_nuget_marker() {
        assert_eq!(package_name_from_assembly("Acme.Core.NuGet"), "Acme.Core");
        assert_eq!(package_name_from_assembly("Acme.Core"), "Acme.Core");
    }
}
