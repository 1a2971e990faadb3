//! Invocation of the external `nuget` executable.
//!
//! Packing and pushing are delegated to the stock NuGet client as opaque
//! child processes. Stdout is captured and returned to the caller rather
//! than only printed, so failures stay diagnosable from code. There is no
//! retry: retrying a packaging step silently could mask a real build
//! defect.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::error::PackError;
use crate::util::process::ProcessBuilder;

/// Environment variable that overrides the `nuget` executable path.
pub const NUGET_TOOL_ENV: &str = "NUPACK_NUGET";

fn nuget_tool() -> String {
    std::env::var(NUGET_TOOL_ENV).unwrap_or_else(|_| "nuget".to_string())
}

/// Run `nuget pack -NoDefaultExcludes <nuspec> [-Sym]` in the nuspec's
/// folder, returning the captured stdout.
pub fn pack(nuspec_path: &Path, separate_symbols: bool) -> Result<String> {
    pack_with(&nuget_tool(), nuspec_path, separate_symbols)
}

fn pack_with(tool: &str, nuspec_path: &Path, separate_symbols: bool) -> Result<String> {
    let cwd = nuspec_path.parent().unwrap_or_else(|| Path::new("."));

    let mut builder = ProcessBuilder::new(tool)
        .arg("pack")
        .arg("-NoDefaultExcludes")
        .arg(nuspec_path)
        .env("EnableNuGetPackageRestore", "true")
        .cwd(cwd);
    if separate_symbols {
        builder = builder.arg("-Sym");
    }

    debug!(tool = %tool, nuspec = %nuspec_path.display(), "packing");
    run(tool, &builder)
}

/// Run `nuget push <package>` in the package's folder, returning the
/// captured stdout.
pub fn push(package_path: &Path) -> Result<String> {
    push_with(&nuget_tool(), package_path)
}

fn push_with(tool: &str, package_path: &Path) -> Result<String> {
    let cwd = package_path.parent().unwrap_or_else(|| Path::new("."));

    let builder = ProcessBuilder::new(tool).arg("push").arg(package_path).cwd(cwd);

    debug!(tool = %tool, package = %package_path.display(), "pushing");
    run(tool, &builder)
}

fn run(tool: &str, builder: &ProcessBuilder) -> Result<String> {
    let output = builder.exec().map_err(|e| PackError::ExternalTool {
        tool: tool.to_string(),
        message: format!("{e:#}"),
        output: String::new(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PackError::ExternalTool {
            tool: tool.to_string(),
            message: format!("exited with {}", output.status),
            output: format!("{stdout}{stderr}"),
        }
        .into());
    }

    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pack_returns_captured_stdout() {
        let tmp = TempDir::new().unwrap();
        let nuspec = tmp.path().join("Acme.Core.nuspec");
        std::fs::write(&nuspec, "<package/>").unwrap();

        let output = pack_with("echo", &nuspec, false).unwrap();
        assert!(output.contains("pack"));
        assert!(output.contains("-NoDefaultExcludes"));
    }

    #[test]
    fn test_unstartable_tool_is_fatal() {
        let err = push_with(
            "definitely-not-a-real-binary-xyz",
            Path::new("/tmp/whatever.nupkg"),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::ExternalTool { .. })
        ));
    }
}
