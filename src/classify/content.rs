//! Content, tools, build and solution-item classification.
//!
//! Items whose package-relative target lives under one of the well-known
//! roots are copied through verbatim: `content/` for consumer content,
//! `tools/` for installation scripts, `build/` for MSBuild hooks, and
//! `sln/` for solution-level items. A project item lands under a root
//! either by its `Include` path or by an explicit link target.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::element::{ElementKind, ManifestElement};
use crate::core::manifest::ContentFilesEntry;
use crate::project::descriptor::ProjectDescriptor;
use crate::project::dialect::ProjectDialect;
use crate::util::fs;

/// The package roots recognized for pass-through files.
pub const CONTENT_ROOTS: &[(&str, ElementKind)] = &[
    ("content/", ElementKind::ContentFile),
    ("sln/", ElementKind::SolutionItemsFile),
    ("tools/", ElementKind::ToolsFile),
    ("build/", ElementKind::BuildFile),
];

/// Classify the project items (and, for SDK projects, the on-disk
/// `content/` folder) that belong under `root`.
///
/// With `flatten` the subfolder structure is discarded and every file
/// lands directly under the destination root.
pub fn content_elements(
    nuspec_dir: &Path,
    desc: &ProjectDescriptor,
    dialect: &dyn ProjectDialect,
    root: &str,
    kind: ElementKind,
    flatten: bool,
) -> Vec<ManifestElement> {
    let project_prefix = fs::relative_to(desc.dir(), nuspec_dir);
    let mut seen: Vec<(String, String)> = Vec::new();

    for group in desc.item_groups() {
        for item in group.children.iter() {
            let Some(include) = item.attr("Include") else {
                continue;
            };
            let source = include.replace('\\', "/");
            let target = dialect
                .content_target(item)
                .map(|t| t.replace('\\', "/"))
                .unwrap_or_else(|| source.clone());
            if !under_root(&target, root) {
                continue;
            }
            push_unique(&mut seen, source, flatten_target(&target, root, flatten));
        }
    }

    // SDK projects include content implicitly; merge what is actually on
    // disk with whatever was declared.
    if kind == ElementKind::ContentFile && dialect.is_sdk() {
        for (source, target) in on_disk_content(desc.dir()) {
            push_unique(&mut seen, source, flatten_target(&target, root, flatten));
        }
    }

    seen.into_iter()
        .map(|(source, target)| {
            ManifestElement::file(kind, fs::join_slash(&project_prefix, &source), target)
        })
        .collect()
}

fn flatten_target(target: &str, root: &str, flatten: bool) -> String {
    if !flatten {
        return target.to_string();
    }
    let name = target.rsplit('/').next().unwrap_or(target);
    format!("{root}{name}")
}

/// The `<contentFiles>` metadata section entries for an SDK package.
///
/// Flat files map to `any/any/<name>`; each content subfolder collapses
/// to one recursive glob.
pub fn sdk_contentfiles_metadata(elements: &[ManifestElement]) -> Vec<ContentFilesEntry> {
    let mut entries = Vec::new();
    for rest in content_relative_targets(elements) {
        if !rest.contains('/') {
            entries.push(ContentFilesEntry::new(format!("any/any/{rest}")));
        }
    }
    for folder in content_folders(elements) {
        entries.push(ContentFilesEntry::new(format!("**/{folder}/*.*")));
    }
    entries
}

/// Extra `<file>` entries copying SDK content under
/// `contentFiles/any/any/`, alongside the plain `content/` copies.
pub fn sdk_contentfiles_files(elements: &[ManifestElement]) -> Vec<ManifestElement> {
    const TARGET_DIR: &str = "contentFiles/any/any";

    let mut extra = Vec::new();
    for el in elements {
        let Some(file) = el.as_file() else { continue };
        let Some(rest) = strip_content_root(&file.target) else {
            continue;
        };
        if !rest.contains('/') {
            extra.push(ManifestElement::file(
                el.kind,
                file.source.clone(),
                format!("{TARGET_DIR}/{rest}"),
            ));
        }
    }

    for folder in content_folders(elements) {
        let src_prefix = elements.iter().find_map(|el| {
            let file = el.as_file()?;
            strip_content_root(&file.target)?;
            let idx = file.source.find("content/")?;
            Some(file.source[..idx + "content/".len()].to_string())
        });
        if let Some(prefix) = src_prefix {
            extra.push(ManifestElement::file(
                ElementKind::ContentFile,
                format!("{prefix}{folder}/**"),
                format!("{TARGET_DIR}/{folder}"),
            ));
        }
    }

    extra
}

fn under_root(target: &str, root: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with(root) && lower != root
}

fn strip_content_root(target: &str) -> Option<&str> {
    let rest = target
        .strip_prefix("content/")
        .or_else(|| target.strip_prefix("Content/"))?;
    (!rest.is_empty()).then_some(rest)
}

fn content_relative_targets(elements: &[ManifestElement]) -> Vec<String> {
    elements
        .iter()
        .filter_map(|el| el.as_file())
        .filter_map(|f| strip_content_root(&f.target))
        .map(str::to_string)
        .collect()
}

fn content_folders(elements: &[ManifestElement]) -> Vec<String> {
    let mut folders: Vec<String> = content_relative_targets(elements)
        .iter()
        .filter_map(|rest| rest.split_once('/').map(|(dir, _)| dir.to_string()))
        .collect();
    folders.sort();
    folders.dedup();
    folders
}

fn push_unique(seen: &mut Vec<(String, String)>, source: String, target: String) {
    let pair = (source, target);
    if !seen.contains(&pair) {
        seen.push(pair);
    }
}

fn on_disk_content(project_dir: &Path) -> Vec<(String, String)> {
    let content_dir = project_dir.join("content");
    if !content_dir.is_dir() {
        return Vec::new();
    }
    let mut pairs = Vec::new();
    for entry in WalkDir::new(&content_dir).sort_by_file_name().into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = fs::relative_to(entry.path(), project_dir);
        pairs.push((relative.clone(), relative));
    }
    pairs
}
