//! Integration tests for repeatability across generations

use super::test_utils::{options, source_tree};
use winpkg::manifest::{GuidGenerator, ManifestAssembler, RandomGuids, StableGuids};

/// Identifiers depend only on relative paths
#[test]
fn test_ids_are_stable_across_runs() {
    let source = source_tree(&[("app.exe", "binary"), ("data/readme.txt", "hello")]);
    let config = options(source.path()).validate().unwrap();

    let first = ManifestAssembler::new(&config).assemble().unwrap();
    let second = ManifestAssembler::new(&config).assemble().unwrap();

    assert_eq!(first.feature_refs(), second.feature_refs());
}

/// Identical trees at different locations produce identical identifiers
#[test]
fn test_ids_do_not_depend_on_source_location() {
    let files = [("app.exe", "binary"), ("data/readme.txt", "hello")];
    let a = source_tree(&files);
    let b = source_tree(&files);

    let doc_a = ManifestAssembler::new(&options(a.path()).validate().unwrap())
        .assemble()
        .unwrap();
    let doc_b = ManifestAssembler::new(&options(b.path()).validate().unwrap())
        .assemble()
        .unwrap();

    assert_eq!(doc_a.feature_refs(), doc_b.feature_refs());
}

/// Stable mode yields byte-identical documents; random mode changes component GUIDs
#[test]
fn test_guid_modes() {
    let source = source_tree(&[("app.exe", "binary")]);
    let mut options = options(source.path());

    let config = options.clone().validate().unwrap();
    let random_a = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    let random_b = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert_ne!(random_a, random_b);

    options.guids = Some("stable".to_string());
    let config = options.validate().unwrap();
    let stable_a = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    let stable_b = ManifestAssembler::new(&config).assemble().unwrap().to_xml();
    assert_eq!(stable_a, stable_b);
}

/// Injected generators are honored
#[test]
fn test_injected_generators() {
    let source = source_tree(&[("app.exe", "binary")]);
    let config = options(source.path()).validate().unwrap();
    let stable = StableGuids::new(config.upgrade_code);

    let doc = ManifestAssembler::new(&config)
        .with_guid_generator(Box::new(stable))
        .assemble()
        .unwrap();
    let id = &doc.feature_refs()[0];
    assert_eq!(doc.component_guid(id), Some(stable.component_guid(id)));

    let doc = ManifestAssembler::new(&config)
        .with_guid_generator(Box::new(RandomGuids))
        .assemble()
        .unwrap();
    assert!(doc.component_guid(&doc.feature_refs()[0]).is_some());
}

/// The default upgrade code is derived from the product name
#[test]
fn test_default_upgrade_code_is_repeatable() {
    let source = source_tree(&[("app.exe", "binary")]);
    let a = options(source.path()).validate().unwrap();
    let b = options(source.path()).validate().unwrap();

    assert_eq!(a.upgrade_code, b.upgrade_code);
}
