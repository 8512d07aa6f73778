//! Integration tests for the winpkg binary

use super::test_utils::source_tree;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn winpkg(cwd: &Path, xdg: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_winpkg"))
        .args(args)
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", xdg.path())
        .env("HOME", xdg.path())
        .env_remove("WINPKG_LOG")
        .env_remove("WINPKG__PACKAGE__NAME")
        .output()
        .unwrap()
}

#[test]
fn test_manifest_to_stdout() {
    let source = source_tree(&[("app.exe", "binary"), ("data/readme.txt", "hello")]);
    let xdg = TempDir::new().unwrap();

    let output = winpkg(
        source.path(),
        &xdg,
        &["--quiet", "manifest", ".", "-n", "MyApp", "-m", "Acme", "-v", "1.0", "-a", "x64"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("ProgramFiles64Folder"));
    assert_eq!(stdout.matches("<ComponentRef ").count(), 2);
}

#[test]
fn test_missing_metadata_exits_with_error() {
    let source = source_tree(&[("app.exe", "binary")]);
    let xdg = TempDir::new().unwrap();

    let output = winpkg(source.path(), &xdg, &["--quiet", "manifest", "-n", "MyApp"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("manufacturer"));
    assert!(stderr.contains("version"));
}

#[test]
fn test_project_file_supplies_metadata() {
    let source = source_tree(&[("app.exe", "binary")]);
    let xdg = TempDir::new().unwrap();
    std::fs::write(
        source.path().join("winpkg.toml"),
        "[package]\nname = \"MyApp\"\nmanufacturer = \"Acme\"\nversion = \"1.0\"\nexecutable = \"app.exe\"\n",
    )
    .unwrap();

    let output = winpkg(source.path(), &xdg, &["--quiet", "inspect", "--format", "json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["product"]["name"], "MyApp");
    assert_eq!(json["install_chain"][1], "ProgramFilesFolder");
    // winpkg.toml itself is part of the tree
    assert_eq!(json["components"].as_array().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_build_reports_linker_failure() {
    let source = source_tree(&[("app.exe", "binary")]);
    let xdg = TempDir::new().unwrap();
    let out = xdg.path().join("out.msi");

    let output = winpkg(
        source.path(),
        &xdg,
        &[
            "--quiet", "build", "-n", "MyApp", "-m", "Acme", "-v", "1.0", "--linker", "false",
            "-o", out.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Linker `false` failed"));
}

#[cfg(unix)]
#[test]
fn test_build_succeeds_with_linker() {
    let source = source_tree(&[("app.exe", "binary")]);
    let xdg = TempDir::new().unwrap();
    let out = xdg.path().join("out.msi");
    let kept = xdg.path().join("kept.wxs");

    let output = winpkg(
        source.path(),
        &xdg,
        &[
            "--quiet", "build", "-n", "MyApp", "-m", "Acme", "-v", "1.0", "--linker", "true",
            "-o", out.to_str().unwrap(), "--keep-manifest", kept.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Generation has succeeded"));
    assert!(std::fs::read_to_string(&kept).unwrap().contains("<ComponentRef Id=\"app.exe\" />"));
}
