//! PE version-resource reading.
//!
//! Package identity and descriptive metadata come from the built
//! assembly's VS_VERSIONINFO block. All pelite usage is confined to this
//! module; the rest of the pipeline consumes the plain
//! [`AssemblyVersionInfo`] value so it stays testable without PE files.

use std::path::Path;

use anyhow::{Context, Result};
use pelite::{FileMap, PeFile};

use crate::core::metadata::AssemblyVersionInfo;

/// Read the version resource of a built assembly.
pub fn read_version_info(path: &Path) -> Result<AssemblyVersionInfo> {
    let map = FileMap::open(path)
        .with_context(|| format!("failed to open assembly: {}", path.display()))?;
    let file = PeFile::from_bytes(map.as_ref())
        .with_context(|| format!("not a valid PE image: {}", path.display()))?;
    let resources = file
        .resources()
        .with_context(|| format!("no resources in assembly: {}", path.display()))?;
    let version_info = resources
        .version_info()
        .with_context(|| format!("no version resource in assembly: {}", path.display()))?;
    let fixed = version_info
        .fixed()
        .with_context(|| format!("no fixed version info in assembly: {}", path.display()))?;

    let fv = fixed.dwFileVersion;
    let lang = version_info.translation().first().copied();
    let value = |key: &str| {
        lang.and_then(|lang| version_info.value(lang, key))
            .map(|v| v.trim_end_matches('\0').trim().to_string())
            .unwrap_or_default()
    };

    let mut product_version = value("ProductVersion");
    if product_version.is_empty() {
        let pv = fixed.dwProductVersion;
        product_version = format!("{}.{}.{}.{}", pv.Major, pv.Minor, pv.Patch, pv.Build);
    }

    Ok(AssemblyVersionInfo {
        file_version: (fv.Major, fv.Minor, fv.Patch, fv.Build),
        product_version,
        company: value("CompanyName"),
        comments: value("Comments"),
        copyright: value("LegalCopyright"),
        special_build: value("SpecialBuild"),
        file_description: value("FileDescription"),
        trademarks: value("LegalTrademarks"),
    })
}
