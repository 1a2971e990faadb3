//! Project descriptor loading.
//!
//! A `ProjectDescriptor` is an immutable view over one csproj/vbproj
//! file: its declared default namespace and the `<Project>` element tree.
//! Descriptors are created on demand for each path queried and never
//! cached, so repeated loads are always safe.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::PackError;

/// One parsed XML element: local name, attributes, children, text.
///
/// Element and attribute lookup go by local name; the document's default
/// namespace is carried by the descriptor instead of every node, which
/// keeps legacy (namespaced) and SDK-style (namespace-free) projects
/// queryable through the same calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    /// Child elements with the given local name.
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child element with the given local name.
    pub fn first(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// Immutable view over one project file.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    path: PathBuf,
    dir: PathBuf,
    namespace: String,
    root: XmlElement,
}

impl ProjectDescriptor {
    /// Load and parse a project file.
    ///
    /// Fails with [`PackError::ProjectNotFound`] when the file is absent,
    /// [`PackError::ProjectParse`] when it is not well-formed XML, and
    /// [`PackError::MissingProjectRoot`] when the document carries no
    /// `<Project>` root element.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PackError::ProjectNotFound(path.to_path_buf()).into());
        }

        let text = fs::read_to_string(path).map_err(|e| PackError::ProjectParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let root = parse_root(&text).map_err(|reason| PackError::ProjectParse {
            path: path.to_path_buf(),
            reason,
        })?;

        let root = match root {
            Some(el) if el.name == "Project" => el,
            _ => return Err(PackError::MissingProjectRoot(path.to_path_buf()).into()),
        };

        let namespace = root
            .attributes
            .iter()
            .find(|(k, _)| k == "xmlns")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        // `parent()` of a bare file name is `Some("")`, which read_dir
        // and joins reject.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(ProjectDescriptor {
            path: path.to_path_buf(),
            dir,
            namespace,
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The folder containing the project file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Declared default namespace; empty is valid (SDK-style projects).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Project file stem, e.g. `Acme.Core` for `Acme.Core.csproj`.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn property_groups(&self) -> impl Iterator<Item = &XmlElement> {
        self.root.elements("PropertyGroup")
    }

    pub fn item_groups(&self) -> impl Iterator<Item = &XmlElement> {
        self.root.elements("ItemGroup")
    }

    /// First non-empty value of a property across all property groups.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.property_groups()
            .filter_map(|pg| pg.first(name))
            .map(XmlElement::text)
            .find(|v| !v.is_empty())
    }

    /// Whether any property group declares the named property, even with
    /// a blank value. Dialect detection keys on declaration, not content.
    pub fn declares_property(&self, name: &str) -> bool {
        self.property_groups().any(|pg| pg.first(name).is_some())
    }

    /// All items with the given name across all item groups.
    pub fn items<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.item_groups().flat_map(move |ig| ig.elements(name))
    }

    /// Declared assembly name, falling back to the project file stem.
    pub fn assembly_name(&self) -> String {
        self.property("AssemblyName")
            .map(str::to_string)
            .unwrap_or_else(|| self.name())
    }
}

/// Parse the document into its root element, if any.
fn parse_root(text: &str) -> std::result::Result<Option<XmlElement>, String> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, el);
            }
            Event::End(_) => {
                let el = stack.pop().ok_or_else(|| "unbalanced end tag".to_string())?;
                attach(&mut stack, &mut root, el);
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }

    Ok(root)
}

fn element_from_start(
    start: &quick_xml::events::BytesStart<'_>,
) -> std::result::Result<XmlElement, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = if attr.key.as_ref() == b"xmlns" {
            "xmlns".to_string()
        } else {
            String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned()
        };
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, el: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            // First completed top-level element wins; anything after it
            // would be malformed XML and rejected by the reader anyway.
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MSBUILD_NS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

    fn write_project(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_legacy_project_with_namespace() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(
            tmp.path(),
            "Legacy.csproj",
            &format!(
                r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="12.0" xmlns="{MSBUILD_NS}">
  <PropertyGroup>
    <AssemblyName>Acme.Legacy</AssemblyName>
    <TargetFrameworkVersion>v4.5</TargetFrameworkVersion>
  </PropertyGroup>
  <ItemGroup>
    <Compile Include="Foo.cs" />
  </ItemGroup>
</Project>"#
            ),
        );

        let desc = ProjectDescriptor::load(&path).unwrap();
        assert_eq!(desc.namespace(), MSBUILD_NS);
        assert_eq!(desc.assembly_name(), "Acme.Legacy");
        assert_eq!(desc.property("TargetFrameworkVersion"), Some("v4.5"));
        assert_eq!(desc.items("Compile").count(), 1);
        assert_eq!(
            desc.items("Compile").next().unwrap().attr("Include"),
            Some("Foo.cs")
        );
    }

    #[test]
    fn test_load_sdk_project_without_namespace() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(
            tmp.path(),
            "Sdk.csproj",
            r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>netstandard2.0</TargetFramework>
  </PropertyGroup>
</Project>"#,
        );

        let desc = ProjectDescriptor::load(&path).unwrap();
        assert_eq!(desc.namespace(), "");
        assert_eq!(desc.property("TargetFramework"), Some("netstandard2.0"));
        // AssemblyName falls back to the file stem.
        assert_eq!(desc.assembly_name(), "Sdk");
    }

    #[test]
    fn test_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectDescriptor::load(&tmp.path().join("Gone.csproj")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_xml_fails() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(tmp.path(), "Bad.csproj", "<Project><PropertyGroup></Project>");
        let err = ProjectDescriptor::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::ProjectParse { .. })
        ));
    }

    #[test]
    fn test_wrong_root_element_fails() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(tmp.path(), "NotProj.csproj", "<Package></Package>");
        let err = ProjectDescriptor::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::MissingProjectRoot(_))
        ));
    }

    #[test]
    fn test_repeated_loads_are_independent() {
        let tmp = TempDir::new().unwrap();
        let path = write_project(
            tmp.path(),
            "Twice.csproj",
            "<Project><PropertyGroup><Version>1.2.3</Version></PropertyGroup></Project>",
        );
        let a = ProjectDescriptor::load(&path).unwrap();
        let b = ProjectDescriptor::load(&path).unwrap();
        assert_eq!(a.property("Version"), b.property("Version"));
    }
}
