//! CLI integration tests for nupack.
//!
//! These tests exercise argument handling and the error surface of the
//! binary; manifest semantics are covered by the library tests.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the nupack binary command.
fn nupack() -> Command {
    Command::cargo_bin("nupack").unwrap()
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// argument handling
// ============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    nupack()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    nupack().arg("frobnicate").assert().failure();
}

#[test]
fn test_release_and_debug_conflict() {
    nupack()
        .args(["project", "Acme.Core.csproj", "--release", "--debug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ============================================================================
// nupack project
// ============================================================================

#[test]
fn test_project_missing_file_fails_with_error() {
    let tmp = temp_dir();
    nupack()
        .args(["project", "Gone.csproj", "--no-pkg"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project file not found"));
}

#[test]
fn test_project_without_build_output_reports_missing_assembly() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("Acme.Core.csproj"),
        "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
         <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
    )
    .unwrap();

    nupack()
        .args(["project", "Acme.Core.csproj", "--no-pkg", "--include-current-proj"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find assembly"));
}

#[test]
fn test_sdk_project_with_framework_references_config_fails() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("Acme.Core.csproj"),
        "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup>\
         <TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
    )
    .unwrap();
    fs::write(
        tmp.path().join("NuGetPack.config"),
        "<NuGetPackConfig><AddFrameworkReferences>true</AddFrameworkReferences></NuGetPackConfig>",
    )
    .unwrap();

    nupack()
        .args(["project", "Acme.Core.csproj", "--no-pkg", "--include-current-proj"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("AddFrameworkReferences"));
}

// ============================================================================
// nupack solution
// ============================================================================

#[test]
fn test_solution_ambiguous_project_folder_fails() {
    let tmp = temp_dir();
    let dir = tmp.path().join("Acme.Core");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("NuGetPack.config"), "<NuGetPackConfig />").unwrap();
    fs::write(dir.join("Acme.Core.csproj"), "<Project />").unwrap();
    fs::write(dir.join("Acme.Core.Old.csproj"), "<Project />").unwrap();

    nupack()
        .args(["solution", ".", "--no-pkg"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one project file"));
}

#[test]
fn test_solution_without_packageable_projects_succeeds() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join("Acme.Tests")).unwrap();
    fs::write(
        tmp.path().join("Acme.Tests/Acme.Tests.csproj"),
        "<Project />",
    )
    .unwrap();

    nupack()
        .args(["solution", ".", "--no-pkg"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("packed 0 project(s)"));
}

// ============================================================================
// nupack push
// ============================================================================

#[test]
fn test_push_missing_package_fails() {
    let tmp = temp_dir();
    nupack()
        .args(["push", "Acme.Core.1.0.0.nupkg"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("package not found"));
}
