//! Shared utilities

pub mod fs;
pub mod nuget;
pub mod process;
pub mod version_info;

pub use process::ProcessBuilder;
