//! Loading and interpreting csproj project files.

pub mod descriptor;
pub mod dialect;
pub mod graph;
pub mod legacy;
pub mod output;
pub mod sdk;

pub use descriptor::{ProjectDescriptor, XmlElement};
pub use dialect::{detect, DialectKind, ProjectDialect};
pub use graph::{referenced_projects, ReferencedProject};
pub use output::{resolve_output_dir, BuildProfile};
