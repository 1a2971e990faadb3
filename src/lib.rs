//! nupack - NuGet manifest builder for csproj projects
//!
//! This crate provides the core library functionality for nupack:
//! project parsing across csproj dialects, artifact classification,
//! dependency reconciliation, and nuspec manifest assembly.

pub mod assemble;
pub mod classify;
pub mod core;
pub mod error;
pub mod ops;
pub mod project;
pub mod util;

pub use core::element::{DependencyEntry, ElementKind, FileEntry, ManifestElement};
pub use core::framework::{TargetFramework, TargetFrameworkSet};
pub use core::manifest::Manifest;
pub use core::metadata::{AssemblyVersionInfo, PackageMetadata};
pub use core::pack_config::PackConfig;
pub use error::PackError;
pub use project::{BuildProfile, ProjectDescriptor, ProjectDialect};
