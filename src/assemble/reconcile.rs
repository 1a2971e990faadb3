//! Element reconciliation.
//!
//! Collection is deliberately greedy; this pass makes the result
//! publishable. Packaging machinery files never ship, duplicate
//! dependency declarations collapse to the first occurrence (root
//! project before references), and dependencies are grouped per target
//! framework with scoped declarations overriding unscoped ones.

use tracing::debug;

use crate::core::element::{DependencyEntry, ManifestElement};
use crate::core::framework::TargetFrameworkSet;
use crate::core::manifest::DependencyGroup;
use crate::project::dialect::ProjectDialect;

/// Packaging machinery that must never ship in a package.
const EXCLUDED_TARGETS: &[&str] = &[
    "packages.config",
    "internalpackages.config",
    "nugetpack.config",
];

/// Drop file elements whose package target is a packaging-machinery file.
pub fn drop_excluded_targets(elements: Vec<ManifestElement>) -> Vec<ManifestElement> {
    elements
        .into_iter()
        .filter(|el| match el.as_file() {
            Some(file) => !is_excluded_target(&file.target),
            None => true,
        })
        .collect()
}

fn is_excluded_target(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    EXCLUDED_TARGETS
        .iter()
        .any(|name| lower == *name || lower.ends_with(&format!("/{name}")))
}

/// Collapse duplicate dependency declarations; the first occurrence wins.
pub fn dedupe_dependencies(deps: Vec<DependencyEntry>) -> Vec<DependencyEntry> {
    let mut unique: Vec<DependencyEntry> = Vec::new();
    for dep in deps {
        if let Some(existing) = unique.iter().find(|d| d.same_identity(&dep)) {
            if existing.version != dep.version {
                debug!(
                    id = %dep.id,
                    kept = %existing.version,
                    dropped = %dep.version,
                    "duplicate dependency declaration"
                );
            }
            continue;
        }
        unique.push(dep);
    }
    unique
}

/// Distribute dependencies over one group per target framework.
///
/// Unscoped dependencies replicate into every group. A dependency scoped
/// to one framework lands only in that group and replaces any unscoped
/// declaration of the same package there.
pub fn group_dependencies(
    deps: &[DependencyEntry],
    frameworks: &TargetFrameworkSet,
    dialect: &dyn ProjectDialect,
) -> Vec<DependencyGroup> {
    frameworks
        .iter()
        .map(|framework| {
            let mut members: Vec<DependencyEntry> = deps
                .iter()
                .filter(|d| d.framework.is_none())
                .cloned()
                .collect();
            for dep in deps
                .iter()
                .filter(|d| d.framework.as_deref() == Some(framework.short()))
            {
                members.retain(|m| !m.id.eq_ignore_ascii_case(&dep.id));
                members.push(dep.clone());
            }
            DependencyGroup {
                target_framework: dialect.group_attribute(framework),
                dependencies: members,
            }
        })
        .collect()
}
