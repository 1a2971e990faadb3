//! Typed manifest elements.
//!
//! Every artifact the classifiers discover becomes one `ManifestElement`:
//! a file-copy instruction, a package dependency declaration, or a
//! framework-assembly reference. The reconciler and assembler only ever
//! consume these; nothing downstream re-inspects project XML.

use std::fmt;

/// Closed set of artifact classes a manifest element can belong to.
///
/// Downstream filtering depends on these being exhaustive: everything that
/// is not a dependency or framework reference ends up in the plain file
/// list of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    PackageDependency,
    FrameworkReference,
    SourceFile,
    ContentFile,
    LibraryFile,
    ToolsFile,
    BuildFile,
    SolutionItemsFile,
}

impl ElementKind {
    /// Whether elements of this kind land in the manifest's `<files>` list.
    pub fn is_file(self) -> bool {
        !matches!(
            self,
            ElementKind::PackageDependency | ElementKind::FrameworkReference
        )
    }
}

/// A source/target pair for one file-copy instruction.
///
/// `source` is relative to the folder the manifest is written into;
/// `target` is the path inside the package layout. Both use forward
/// slashes on every platform so manifest output is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub source: String,
    pub target: String,
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// One package dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Package id as declared.
    pub id: String,
    /// Resolved version string.
    pub version: String,
    /// Asset classes excluded from transitive flow (SDK dialects emit
    /// `Build,Analyzers` here).
    pub exclude: Option<String>,
    /// Short moniker this dependency is scoped to, when it was declared
    /// inside a framework-conditioned item group. `None` means it applies
    /// to every framework the project targets.
    pub framework: Option<String>,
}

impl DependencyEntry {
    /// Dependency identity is the case-insensitive package id within the
    /// same framework scope.
    pub fn same_identity(&self, other: &DependencyEntry) -> bool {
        self.id.eq_ignore_ascii_case(&other.id) && self.framework == other.framework
    }
}

/// A framework-assembly reference (resolved from the target framework's
/// reference assemblies rather than a package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkReferenceEntry {
    pub assembly_name: String,
}

/// Payload of one manifest element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementPayload {
    File(FileEntry),
    Dependency(DependencyEntry),
    FrameworkReference(FrameworkReferenceEntry),
}

/// One typed unit of manifest content. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestElement {
    pub kind: ElementKind,
    pub payload: ElementPayload,
}

impl ManifestElement {
    /// A file-copy element of the given kind.
    pub fn file(kind: ElementKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        debug_assert!(kind.is_file());
        ManifestElement {
            kind,
            payload: ElementPayload::File(FileEntry {
                source: source.into(),
                target: target.into(),
            }),
        }
    }

    /// An unscoped package dependency.
    pub fn dependency(id: impl Into<String>, version: impl Into<String>) -> Self {
        ManifestElement {
            kind: ElementKind::PackageDependency,
            payload: ElementPayload::Dependency(DependencyEntry {
                id: id.into(),
                version: version.into(),
                exclude: None,
                framework: None,
            }),
        }
    }

    /// A package dependency with explicit exclusions and optional
    /// framework scope.
    pub fn dependency_full(entry: DependencyEntry) -> Self {
        ManifestElement {
            kind: ElementKind::PackageDependency,
            payload: ElementPayload::Dependency(entry),
        }
    }

    /// A framework-assembly reference.
    pub fn framework_reference(assembly_name: impl Into<String>) -> Self {
        ManifestElement {
            kind: ElementKind::FrameworkReference,
            payload: ElementPayload::FrameworkReference(FrameworkReferenceEntry {
                assembly_name: assembly_name.into(),
            }),
        }
    }

    /// The file payload, if this element is a file-copy instruction.
    pub fn as_file(&self) -> Option<&FileEntry> {
        match &self.payload {
            ElementPayload::File(f) => Some(f),
            _ => None,
        }
    }

    /// The dependency payload, if this element is a package dependency.
    pub fn as_dependency(&self) -> Option<&DependencyEntry> {
        match &self.payload {
            ElementPayload::Dependency(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kinds() {
        assert!(ElementKind::SourceFile.is_file());
        assert!(ElementKind::LibraryFile.is_file());
        assert!(ElementKind::ToolsFile.is_file());
        assert!(!ElementKind::PackageDependency.is_file());
        assert!(!ElementKind::FrameworkReference.is_file());
    }

    #[test]
    fn test_dependency_identity_is_case_insensitive() {
        let a = DependencyEntry {
            id: "FakeItEasy".into(),
            version: "1.24.0".into(),
            exclude: None,
            framework: None,
        };
        let b = DependencyEntry {
            id: "fakeiteasy".into(),
            version: "2.0.0".into(),
            exclude: None,
            framework: None,
        };
        assert!(a.same_identity(&b));
    }

    #[test]
    fn test_dependency_identity_respects_framework_scope() {
        let unscoped = DependencyEntry {
            id: "X".into(),
            version: "1.0.0".into(),
            exclude: None,
            framework: None,
        };
        let scoped = DependencyEntry {
            framework: Some("net45".into()),
            ..unscoped.clone()
        };
        assert!(!unscoped.same_identity(&scoped));
    }
}
