//! Integration tests for layered configuration loading

use super::test_utils::{source_tree, with_xdg_env};
use std::fs;
use tempfile::TempDir;
use winpkg::config::ConfigLoader;

/// Global file < project file < explicit file < environment
#[test]
fn test_layer_precedence() {
    let xdg = TempDir::new().unwrap();
    let project = source_tree(&[("app.exe", "binary")]);

    fs::create_dir_all(xdg.path().join("winpkg")).unwrap();
    fs::write(
        xdg.path().join("winpkg").join("config.toml"),
        "[package]\nmanufacturer = \"Global Corp\"\nname = \"GlobalName\"\narch = \"x64\"\n",
    )
    .unwrap();
    fs::write(
        project.path().join("winpkg.toml"),
        "[package]\nname = \"ProjectName\"\nversion = \"2.0\"\n",
    )
    .unwrap();
    let explicit = project.path().join("release.toml");
    fs::write(&explicit, "[package]\nversion = \"3.0\"\n").unwrap();

    let config = with_xdg_env(&xdg, || {
        std::env::set_var("WINPKG__PACKAGE__NAME", "EnvName");
        let config = ConfigLoader::load(project.path(), Some(&explicit));
        std::env::remove_var("WINPKG__PACKAGE__NAME");
        config.unwrap()
    });

    assert_eq!(config.package.manufacturer.as_deref(), Some("Global Corp"));
    assert_eq!(config.package.arch.as_deref(), Some("x64"));
    assert_eq!(config.package.version.as_deref(), Some("3.0"));
    assert_eq!(config.package.name.as_deref(), Some("EnvName"));
}

/// Defaults apply when no file sets a value
#[test]
fn test_defaults_without_files() {
    let xdg = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let config = with_xdg_env(&xdg, || ConfigLoader::load(project.path(), None).unwrap());

    assert_eq!(config.package.arch.as_deref(), Some("x86"));
    assert_eq!(config.package.guids.as_deref(), Some("random"));
    assert_eq!(config.package.entry_policy.as_deref(), Some("skip"));
    assert_eq!(config.linker.program, "wixl");
    assert_eq!(config.package.name, None);
}

/// Loaded options validate into a full package configuration
#[test]
fn test_loaded_options_validate() {
    let xdg = TempDir::new().unwrap();
    let project = source_tree(&[("app.exe", "binary")]);
    fs::write(
        project.path().join("winpkg.toml"),
        format!(
            "[package]\nsource = {:?}\nname = \"MyApp\"\nmanufacturer = \"Acme\"\nversion = \"1.2.3\"\nlocal = true\n",
            project.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let config = with_xdg_env(&xdg, || ConfigLoader::load(project.path(), None).unwrap());
    let package = config.package.validate().unwrap();

    assert!(package.local);
    assert_eq!(package.install_dir, "MyApp");
    assert_eq!(package.version, "1.2.3");
}
