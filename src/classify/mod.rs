//! Classification of project artifacts into typed manifest elements.

pub mod binaries;
pub mod content;
pub mod dependencies;
pub mod references;
pub mod sources;
