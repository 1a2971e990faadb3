//! Companion `NuGetPack.config` reader.
//!
//! A small fixed-schema XML settings file that may sit next to a project
//! file. Its presence marks the project as independently packageable;
//! its fields override metadata sourced from the assembly version
//! resource. Absence of the file is never an error and every field is
//! optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The companion configuration filename (matched case-insensitively).
pub const PACK_CONFIG_FILE: &str = "NuGetPack.config";

/// Deserialized `NuGetPack.config` contents.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackConfig {
    #[serde(rename = "AddFrameworkReferences")]
    pub add_framework_references: Option<bool>,

    #[serde(rename = "DoIncludeSources")]
    pub do_include_sources: Option<bool>,

    #[serde(rename = "IconUrl")]
    pub icon_url: Option<String>,

    #[serde(rename = "ProjectUrl")]
    pub project_url: Option<String>,

    #[serde(rename = "LicenseUrl")]
    pub license_url: Option<String>,

    #[serde(rename = "Authors")]
    pub authors: Option<String>,

    #[serde(rename = "Owners")]
    pub owners: Option<String>,

    #[serde(rename = "Copyright")]
    pub copyright: Option<String>,

    #[serde(rename = "Description")]
    pub description: Option<String>,

    #[serde(rename = "Summary")]
    pub summary: Option<String>,

    #[serde(rename = "Keywords")]
    pub keywords: Option<String>,

    #[serde(rename = "DoIncludeCurrentProjectInNuSpec")]
    pub do_include_current_project: Option<bool>,

    #[serde(rename = "DoSeparateSymbols")]
    pub do_separate_symbols: Option<bool>,
}

impl PackConfig {
    /// Whether framework references should be added (defaults to off).
    pub fn add_framework_references(&self) -> bool {
        self.add_framework_references.unwrap_or(false)
    }

    /// Whether sources are embedded in the package (defaults to on).
    pub fn include_sources(&self) -> bool {
        self.do_include_sources.unwrap_or(true)
    }

    /// Whether symbols are split into a separate package (defaults to off).
    pub fn separate_symbols(&self) -> bool {
        self.do_separate_symbols.unwrap_or(false)
    }

    /// Load a config file. A missing file yields `Ok(None)`; an existing
    /// but unparsable file is fatal, since a half-read config cannot yield
    /// a trustworthy manifest.
    pub fn load(path: &Path) -> Result<Option<PackConfig>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: PackConfig = quick_xml::de::from_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Load the companion config for a project folder, if one exists.
    pub fn for_project_dir(dir: &Path) -> Result<Option<PackConfig>> {
        match find_config_file(dir) {
            Some(path) => PackConfig::load(&path),
            None => Ok(None),
        }
    }
}

/// Locate `NuGetPack.config` in a folder, matching the name
/// case-insensitively the way Windows-origin project trees expect.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name
            .to_string_lossy()
            .eq_ignore_ascii_case(PACK_CONFIG_FILE)
            && entry.path().is_file()
        {
            return Some(entry.path());
        }
    }
    None
}
