//! Implementation of `nupack push`.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use crate::util::nuget;

/// Push a built package to the configured feed via the external tool.
pub fn publish(package: &Path) -> Result<String> {
    if !package.is_file() {
        bail!("package not found: {}", package.display());
    }
    info!(package = %package.display(), "pushing package");
    nuget::push(package)
}
