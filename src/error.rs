//! Typed failure classes for manifest building.
//!
//! Most functions in this crate return `anyhow::Result`; the variants here
//! exist so callers (and tests) can match on the failure class instead of
//! scraping messages. Only the CLI layer converts these into exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Failure classes a manifest build can surface.
#[derive(Debug, Error)]
pub enum PackError {
    /// Project file does not exist on disk.
    #[error("project file not found: {0}")]
    ProjectNotFound(PathBuf),

    /// Project file exists but is not parseable XML.
    #[error("failed to parse project file {path}: {reason}")]
    ProjectParse { path: PathBuf, reason: String },

    /// Project file parsed but carries no recognizable `<Project>` root.
    #[error("no <Project> root element in {0}")]
    MissingProjectRoot(PathBuf),

    /// The built assembly could not be located in any resolved output folder.
    #[error("could not find assembly `{name}`, searched {searched}")]
    AssemblyNotFound { name: String, searched: PathBuf },

    /// Framework references only make sense for legacy full-framework
    /// projects; requesting them for an SDK-style project is a
    /// configuration mistake, not a transient condition.
    #[error(
        "AddFrameworkReferences is not supported for SDK-style projects; \
         edit the project's NuGetPack.config"
    )]
    FrameworkReferencesUnsupported,

    /// SDK-style projects always embed their own output; a config that
    /// opts out describes a packaging model that does not exist for them.
    #[error(
        "SDK-style projects must include the current project; \
         edit the project's NuGetPack.config"
    )]
    CurrentProjectRequired,

    /// A solution-level discovery folder must hold exactly one project file.
    #[error("more than one project file found in folder {0}")]
    AmbiguousProjectFolder(PathBuf),

    /// The external packaging executable could not be started or exited
    /// abnormally. Captured output is attached for diagnosis; there is no
    /// retry.
    #[error("`{tool}` failed: {message}\n{output}")]
    ExternalTool {
        tool: String,
        message: String,
        output: String,
    },
}
