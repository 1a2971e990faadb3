//! Command implementations.

pub mod project;
pub mod push;
pub mod solution;
