//! Collecting, reconciling and assembling manifest content.

pub mod builder;
pub mod collect;
pub mod reconcile;

pub use builder::build_manifest;
pub use collect::{collect, CollectOptions, CollectedElements};
