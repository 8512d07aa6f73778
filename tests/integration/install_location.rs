//! Integration tests for install location resolution

use super::test_utils::{options, source_tree};
use winpkg::manifest::ManifestAssembler;

fn chain(local: bool, arch: &str, root_install: bool) -> (Vec<String>, String) {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = options(source.path());
    options.local = Some(local);
    options.arch = Some(arch.to_string());
    options.root_install = Some(root_install);
    let config = options.validate().unwrap();

    let doc = ManifestAssembler::new(&config).assemble().unwrap();
    let ids = doc
        .directories
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    (ids, doc.to_xml())
}

#[test]
fn test_local_install_goes_to_local_app_data() {
    let (ids, xml) = chain(true, "x64", false);
    assert_eq!(ids, vec!["TARGETDIR", "LocalAppDataFolder", "INSTALLDIR"]);
    assert!(xml.contains("InstallScope=\"perUser\""));
}

#[test]
fn test_x64_install_goes_to_program_files_64() {
    let (ids, xml) = chain(false, "x64", false);
    assert_eq!(ids, vec!["TARGETDIR", "ProgramFiles64Folder", "INSTALLDIR"]);
    assert!(xml.contains("InstallScope=\"perMachine\""));
}

#[test]
fn test_x86_install_goes_to_program_files() {
    let (ids, _) = chain(false, "x86", false);
    assert_eq!(ids, vec!["TARGETDIR", "ProgramFilesFolder", "INSTALLDIR"]);
}

#[test]
fn test_root_install_skips_programs_folder() {
    let (ids, xml) = chain(false, "x64", true);
    assert_eq!(ids, vec!["TARGETDIR", "INSTALLDIR"]);
    assert!(!xml.contains("ProgramFiles"));
}

#[test]
fn test_custom_install_dir_name() {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = options(source.path());
    options.install_dir = Some("Acme Tools".to_string());
    let config = options.validate().unwrap();

    let xml = ManifestAssembler::new(&config).assemble().unwrap().to_xml();

    assert!(xml.contains("<Directory Id=\"INSTALLDIR\" Name=\"Acme Tools\">"));
}
