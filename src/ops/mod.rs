//! High-level operations.
//!
//! This module contains the implementation of nupack commands.

pub mod pack_project;
pub mod pack_solution;
pub mod publish;

pub use pack_project::{pack_project, PackOutcome, ProjectPackOptions};
pub use pack_solution::{find_packageable_projects, pack_solution, SolutionPackOptions};
pub use publish::publish;
