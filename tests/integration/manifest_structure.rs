//! Integration tests for the structure of the generated manifest

use super::test_utils::{config, source_tree};
use winpkg::manifest::ManifestAssembler;
use winpkg::package::write_manifest;
use winpkg::tree::id;

/// Two files, one nested: both become components, directories mirror the tree
#[test]
fn test_end_to_end_manifest_for_small_tree() {
    let source = source_tree(&[("app.exe", "binary"), ("data/readme.txt", "hello")]);
    let config = config(source.path());

    let doc = ManifestAssembler::new(&config).assemble().unwrap();
    let xml = doc.to_xml();

    assert_eq!(
        doc.directories.ids(),
        vec!["TARGETDIR", "ProgramFilesFolder", "INSTALLDIR"]
    );
    assert_eq!(xml.matches("<ComponentRef ").count(), 2);
    assert!(xml.contains("<ComponentRef Id=\"app.exe\" />"));
    assert!(xml.contains("<ComponentRef Id=\"data%2Freadme.txt\" />"));
    assert!(xml.contains("<Directory Id=\"data\" Name=\"data\">"));
    assert!(xml.contains("Name=\"readme.txt\""));
    assert!(xml.contains("InstallScope=\"perMachine\""));
    assert!(!xml.contains("<Shortcut"));
    assert!(!xml.contains("ProgramMenuFolder"));
}

/// Directory chain nesting order in the document text
#[test]
fn test_directory_chain_is_nested_in_order() {
    let source = source_tree(&[("app.exe", "binary")]);
    let config = config(source.path());

    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();

    let target = xml.find("<Directory Id=\"TARGETDIR\"").unwrap();
    let programs = xml.find("<Directory Id=\"ProgramFilesFolder\"").unwrap();
    let install = xml.find("<Directory Id=\"INSTALLDIR\" Name=\"MyApp\">").unwrap();
    let component = xml.find("<Component Id=\"app.exe\"").unwrap();
    assert!(target < programs && programs < install && install < component);
}

/// Each component's identifier decodes back to its relative path
#[test]
fn test_component_ids_decode_to_relative_paths() {
    let source = source_tree(&[
        ("a b/c.txt", "1"),
        ("a%2Fb.txt", "2"),
        ("deep/er/still/file.dat", "3"),
    ]);
    let config = config(source.path());

    let doc = ManifestAssembler::new(&config).assemble().unwrap();

    assert_eq!(doc.feature_refs().len(), 3);
    for file in doc.tree.root.iter_files() {
        assert_eq!(id::decode(file.id.as_str()).unwrap(), file.relative_path);
    }
}

/// Empty source tree still yields a valid manifest with an empty feature
#[test]
fn test_empty_source_tree() {
    let source = source_tree(&[]);
    let config = config(source.path());

    let doc = ManifestAssembler::new(&config).assemble().unwrap();
    let xml = doc.to_xml();

    assert!(doc.feature_refs().is_empty());
    assert!(xml.contains("<Feature Id=\"App\" Level=\"1\">"));
    assert!(!xml.contains("<Component "));
}

/// Empty subdirectories are declared but contribute no components
#[test]
fn test_empty_subdirectory_is_declared() {
    let source = source_tree(&[("app.exe", "binary")]);
    std::fs::create_dir(source.path().join("logs")).unwrap();
    let config = config(source.path());

    let doc = ManifestAssembler::new(&config).assemble().unwrap();

    assert_eq!(doc.feature_refs().len(), 1);
    assert!(doc.to_xml().contains("<Directory Id=\"logs\" Name=\"logs\">"));
}

/// Product metadata escapes XML-special characters
#[test]
fn test_metadata_is_escaped() {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = super::test_utils::options(source.path());
    options.manufacturer = Some("Smith & \"Sons\" <Ltd>".to_string());
    let config = options.validate().unwrap();

    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();

    assert!(xml.contains("Manufacturer=\"Smith &amp; &quot;Sons&quot; &lt;Ltd&gt;\""));
}

/// Writing to a path produces the same document as rendering in memory
#[test]
fn test_write_manifest_to_path() {
    let source = source_tree(&[("app.exe", "binary")]);
    let out_dir = tempfile::TempDir::new().unwrap();
    let out = out_dir.path().join("app.wxs");
    let config = config(source.path());

    let doc = write_manifest(&config, &out).unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), doc.to_xml());
}

/// Subdirectories named like well-known directories get distinct ids
#[test]
fn test_reserved_directory_names_do_not_collide() {
    let source = source_tree(&[
        ("INSTALLDIR/f.txt", "1"),
        ("TARGETDIR/f.txt", "2"),
        ("ProgramFilesFolder/f.txt", "3"),
    ]);
    let config = config(source.path());

    let doc = ManifestAssembler::new(&config).assemble().unwrap();
    let xml = doc.to_xml();

    for reserved in ["INSTALLDIR", "TARGETDIR", "ProgramFilesFolder"] {
        let declared = format!("<Directory Id=\"{}\"", reserved);
        assert_eq!(xml.matches(&declared).count(), 1, "{} declared twice", reserved);
    }
    assert!(xml.contains("<Directory Id=\"%49NSTALLDIR\" Name=\"INSTALLDIR\">"));
    assert!(xml.contains("<Directory Id=\"%54ARGETDIR\" Name=\"TARGETDIR\">"));
    assert!(xml.contains("<ComponentRef Id=\"INSTALLDIR%2Ff.txt\" />"));
}
