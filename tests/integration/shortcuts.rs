//! Integration tests for start-menu and desktop shortcut attachment

use super::test_utils::{options, source_tree};
use winpkg::manifest::ManifestAssembler;

/// Only the file whose path ends with the marker gets shortcuts
#[test]
fn test_marker_matches_only_the_executable() {
    let source = source_tree(&[("bin/app.exe", "binary"), ("bin/lib/app.exe.bak", "old")]);
    let mut options = options(source.path());
    options.executable = Some("bin/app.exe".to_string());
    let config = options.validate().unwrap();

    let doc = ManifestAssembler::new(&config).assemble().unwrap();
    let xml = doc.to_xml();

    let with_shortcuts: Vec<_> = doc
        .tree
        .root
        .iter_files()
        .filter(|f| !f.shortcuts.is_empty())
        .map(|f| f.relative_path.clone())
        .collect();
    assert_eq!(with_shortcuts, vec![std::path::PathBuf::from("bin/app.exe")]);
    assert_eq!(doc.tree.shortcut_count(), 2);
    assert_eq!(xml.matches("<Shortcut ").count(), 2);
    assert!(xml.contains("Id=\"StartMenuShortcut\" Directory=\"ProgramMenuFolder\""));
    assert!(xml.contains("Id=\"DesktopShortcut\" Directory=\"DesktopFolder\""));
    assert!(xml.contains("<Directory Id=\"ProgramMenuFolder\" />"));
    assert!(xml.contains("<Directory Id=\"DesktopFolder\" />"));
}

/// Shortcut text comes from the product name and falls back to the manufacturer
#[test]
fn test_shortcut_name_and_description() {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = options(source.path());
    options.executable = Some("app.exe".to_string());
    let config = options.clone().validate().unwrap();

    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert!(xml.contains("Name=\"MyApp\" Description=\"Acme\""));

    options.description = Some("Does things".to_string());
    let config = options.validate().unwrap();
    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert!(xml.contains("Name=\"MyApp\" Description=\"Does things\""));
}

/// Shortcuts reference the icon only when one is configured
#[test]
fn test_shortcut_icon_follows_product_icon() {
    let source = source_tree(&[("app.exe", "binary")]);
    let icon_dir = source_tree(&[("icon.ico", "ico")]);
    let mut options = options(source.path());
    options.executable = Some("app.exe".to_string());

    let config = options.clone().validate().unwrap();
    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert!(!xml.contains("Icon=\"icon.ico\""));
    assert!(!xml.contains("ARPPRODUCTICON"));

    options.icon = Some(icon_dir.path().join("icon.ico"));
    let config = options.validate().unwrap();
    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert_eq!(xml.matches("Icon=\"icon.ico\"").count(), 2);
    assert!(xml.contains("<Property Id=\"ARPPRODUCTICON\" Value=\"icon.ico\" />"));
    assert!(xml.contains("<Icon Id=\"icon.ico\" SourceFile="));
}

/// A marker that matches nothing produces no shortcuts and no shortcut folders
#[test]
fn test_unmatched_marker() {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = options(source.path());
    options.executable = Some("missing.exe".to_string());
    let config = options.validate().unwrap();

    let doc = ManifestAssembler::new(&config).assemble().unwrap();

    assert_eq!(doc.tree.shortcut_count(), 0);
    assert!(!doc.to_xml().contains("ProgramMenuFolder"));
}
