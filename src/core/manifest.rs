//! The output manifest document and its serializer.
//!
//! A `Manifest` is the fully reconciled result of one pack run: package
//! metadata, framework-scoped dependency groups, the optional sections
//! SDK-style packages need, and the plain file-copy list. `to_xml`
//! renders it as a nuspec document with a fixed element and attribute
//! order so building the same project twice yields byte-identical output.

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::element::{DependencyEntry, FileEntry};
use crate::core::metadata::PackageMetadata;

/// One target framework paired with the ordered dependencies that apply
/// under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    /// Group attribute value; long moniker for SDK dialects, `net<ver>`
    /// for legacy ones.
    pub target_framework: String,
    pub dependencies: Vec<DependencyEntry>,
}

/// One `<contentFiles>` declaration for SDK-style packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilesEntry {
    pub include: String,
    pub build_action: String,
}

impl ContentFilesEntry {
    pub fn new(include: impl Into<String>) -> Self {
        ContentFilesEntry {
            include: include.into(),
            ..ContentFilesEntry::default()
        }
    }
}

impl Default for ContentFilesEntry {
    fn default() -> Self {
        ContentFilesEntry {
            include: String::new(),
            build_action: "Content".to_string(),
        }
    }
}

/// The assembled manifest for one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub metadata: PackageMetadata,
    pub dependency_groups: Vec<DependencyGroup>,
    /// Framework-assembly names; empty means the section is omitted.
    pub framework_assemblies: Vec<String>,
    /// Manifest-level assembly references (SDK dialects); an empty list
    /// still renders an empty `<references>` element, matching the
    /// established emitter behavior consumers rely on.
    pub references: Vec<String>,
    /// `<contentFiles>` declarations; empty means the section is omitted.
    pub content_files: Vec<ContentFilesEntry>,
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// Render the manifest as a nuspec XML document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("package")))?;
        writer.write_event(Event::Start(BytesStart::new("metadata")))?;

        let m = &self.metadata;
        write_text(&mut writer, "id", &m.id)?;
        write_text(&mut writer, "version", &m.version)?;
        write_text(&mut writer, "title", &m.title)?;
        write_text(&mut writer, "authors", &m.authors)?;
        write_text(&mut writer, "owners", &m.owners)?;
        write_text(&mut writer, "description", &m.description)?;
        write_text(&mut writer, "releaseNotes", &m.release_notes)?;
        write_text(&mut writer, "summary", &m.summary)?;
        write_text(&mut writer, "language", "en-US")?;
        write_text(&mut writer, "projectUrl", &m.project_url)?;
        write_text(&mut writer, "iconUrl", &m.icon_url)?;
        write_text(&mut writer, "requireLicenseAcceptance", "false")?;
        write_text(&mut writer, "licenseUrl", &m.license_url)?;
        write_text(&mut writer, "copyright", &m.copyright)?;

        self.write_dependencies(&mut writer)?;
        self.write_references(&mut writer)?;
        self.write_content_files(&mut writer)?;

        write_text(&mut writer, "tags", &m.tags)?;
        self.write_framework_assemblies(&mut writer)?;

        writer.write_event(Event::End(BytesEnd::new("metadata")))?;

        writer.write_event(Event::Start(BytesStart::new("files")))?;
        for file in &self.files {
            let mut el = BytesStart::new("file");
            el.push_attribute(("src", file.source.as_str()));
            el.push_attribute(("target", file.target.as_str()));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("files")))?;

        writer.write_event(Event::End(BytesEnd::new("package")))?;

        let mut out = String::from_utf8(writer.into_inner())?;
        out.push('\n');
        Ok(out)
    }

    fn write_dependencies(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
        for group in &self.dependency_groups {
            let mut el = BytesStart::new("group");
            el.push_attribute(("targetFramework", group.target_framework.as_str()));
            if group.dependencies.is_empty() {
                writer.write_event(Event::Empty(el))?;
                continue;
            }
            writer.write_event(Event::Start(el))?;
            for dep in &group.dependencies {
                let mut dep_el = BytesStart::new("dependency");
                dep_el.push_attribute(("id", dep.id.as_str()));
                dep_el.push_attribute(("version", dep.version.as_str()));
                if let Some(exclude) = &dep.exclude {
                    dep_el.push_attribute(("exclude", exclude.as_str()));
                }
                writer.write_event(Event::Empty(dep_el))?;
            }
            writer.write_event(Event::End(BytesEnd::new("group")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("dependencies")))?;
        Ok(())
    }

    fn write_references(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        if self.references.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("references")))?;
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("references")))?;
        writer.write_event(Event::Start(BytesStart::new("group")))?;
        for file in &self.references {
            let mut el = BytesStart::new("reference");
            el.push_attribute(("file", file.as_str()));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("group")))?;
        writer.write_event(Event::End(BytesEnd::new("references")))?;
        Ok(())
    }

    fn write_content_files(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        if self.content_files.is_empty() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("contentFiles")))?;
        for entry in &self.content_files {
            let mut el = BytesStart::new("files");
            el.push_attribute(("include", entry.include.as_str()));
            el.push_attribute(("buildAction", entry.build_action.as_str()));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("contentFiles")))?;
        Ok(())
    }

    fn write_framework_assemblies(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        if self.framework_assemblies.is_empty() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("frameworkAssemblies")))?;
        for name in &self.framework_assemblies {
            let mut el = BytesStart::new("frameworkAssembly");
            el.push_attribute(("assemblyName", name.as_str()));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("frameworkAssemblies")))?;
        Ok(())
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
