//! Target framework monikers.
//!
//! A project resolves to one or more monikers. The short form (`net45`,
//! `netstandard2.0`) names library folders inside the package; the long
//! form (`.NETFramework4.5`, `.NETStandard2.0`) names dependency-group
//! attributes in SDK-style manifests.

use std::fmt;

/// One normalized target framework, stored in short (folder) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetFramework {
    short: String,
}

impl TargetFramework {
    /// From a short moniker as declared in an SDK-style project
    /// (`net45`, `netstandard2.0`, `netcoreapp3.1`).
    pub fn from_moniker(moniker: &str) -> Self {
        TargetFramework {
            short: moniker.trim().to_string(),
        }
    }

    /// From a legacy `TargetFrameworkVersion` property value such as
    /// `v4.5`: punctuation and prefixes are stripped to `45`, yielding
    /// the folder form `net45`.
    pub fn from_legacy_version(version: &str) -> Self {
        let digits: String = version
            .chars()
            .filter(|c| *c != 'v' && *c != 'V' && *c != '.')
            .collect();
        let digits = digits.trim_start_matches("net").to_string();
        TargetFramework {
            short: format!("net{digits}"),
        }
    }

    /// Short (folder-naming) form, e.g. `net45`.
    pub fn short(&self) -> &str {
        &self.short
    }

    /// Long (metadata-attribute) form, e.g. `.NETFramework4.5`.
    pub fn long(&self) -> String {
        expand_moniker(&self.short)
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short)
    }
}

/// Expand a short moniker to its long manifest form.
///
/// `netstandardX.Y` becomes `.NETStandardX.Y` (a bare `netstandard2` gains
/// the trailing `.0`), `netcoreappX.Y` becomes `.NETCoreAppX.Y`, and a
/// digits-only `netXY` becomes `.NETFrameworkX.Y` with one dot between
/// each digit.
pub fn expand_moniker(short: &str) -> String {
    let lower = short.to_ascii_lowercase();

    if let Some(rest) = lower.strip_prefix("netstandard") {
        let mut version = rest.to_string();
        if !version.contains('.') && !version.is_empty() {
            version.push_str(".0");
        }
        return format!(".NETStandard{version}");
    }

    if let Some(rest) = lower.strip_prefix("netcoreapp") {
        return format!(".NETCoreApp{rest}");
    }

    if let Some(rest) = lower.strip_prefix("net") {
        if rest.contains('.') {
            return format!(".NETFramework{rest}");
        }
        let dotted: Vec<String> = rest.chars().map(|c| c.to_string()).collect();
        return format!(".NETFramework{}", dotted.join("."));
    }

    short.to_string()
}

/// The ordered, non-empty set of frameworks one project targets.
///
/// Multi-target projects preserve moniker order as declared. This is a
/// derived value, recomputed from the descriptor whenever it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFrameworkSet {
    frameworks: Vec<TargetFramework>,
}

impl TargetFrameworkSet {
    /// A single-framework set.
    pub fn single(framework: TargetFramework) -> Self {
        TargetFrameworkSet {
            frameworks: vec![framework],
        }
    }

    /// From a semicolon-delimited moniker list (`net45;netstandard2.0`).
    /// Empty entries are dropped; the caller guarantees at least one
    /// remains.
    pub fn from_list(list: &str) -> Self {
        let frameworks = list
            .split(';')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(TargetFramework::from_moniker)
            .collect();
        TargetFrameworkSet { frameworks }
    }

    /// First declared framework.
    pub fn first(&self) -> &TargetFramework {
        &self.frameworks[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetFramework> {
        self.frameworks.iter()
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }

    /// Whether the project multi-targets.
    pub fn is_multi(&self) -> bool {
        self.frameworks.len() > 1
    }
}
