//! Core data model: manifest elements, frameworks, metadata, and the
//! output document.

pub mod element;
pub mod framework;
pub mod manifest;
pub mod metadata;
pub mod pack_config;

pub use element::{DependencyEntry, ElementKind, FileEntry, ManifestElement};
pub use framework::{TargetFramework, TargetFrameworkSet};
pub use manifest::{ContentFilesEntry, DependencyGroup, Manifest};
pub use metadata::{AssemblyVersionInfo, PackageMetadata};
pub use pack_config::PackConfig;
