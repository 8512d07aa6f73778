//! WiX source rendering

use crate::manifest::document::ManifestDocument;
use crate::manifest::guid::format_guid;
use crate::manifest::location::{DirectoryLink, TARGET_DIR_ID};
use crate::manifest::xml::XmlWriter;
use crate::tree::{DirectoryEntry, FileEntry, ShortcutKind, INSTALL_DIR_ID};

pub const WIX_NAMESPACE: &str = "http://schemas.microsoft.com/wix/2006/wi";

/// Icon table key referenced by the product and by shortcuts
pub const ICON_ID: &str = "icon.ico";

/// Feature that every component belongs to
pub const FEATURE_ID: &str = "App";

const PREVIOUS_VERSIONS_PROPERTY: &str = "PREVIOUSVERSIONSINSTALLED";

/// Render the complete WiX document
pub fn render(doc: &ManifestDocument) -> String {
    let product = &doc.product;
    let upgrade_code = format_guid(&product.upgrade_code);
    let mut w = XmlWriter::new();

    w.declaration();
    w.start("Wix", &[("xmlns", WIX_NAMESPACE)]);
    w.start(
        "Product",
        &[
            ("Id", "*"),
            ("Name", product.name.as_str()),
            ("UpgradeCode", upgrade_code.as_str()),
            ("Language", "1033"),
            ("Codepage", "1252"),
            ("Version", product.version.as_str()),
            ("Manufacturer", product.manufacturer.as_str()),
        ],
    );

    w.empty(
        "Property",
        &[("Id", PREVIOUS_VERSIONS_PROPERTY), ("Secure", "yes")],
    );
    if product.icon.is_some() {
        w.empty("Property", &[("Id", "ARPPRODUCTICON"), ("Value", ICON_ID)]);
    }

    w.start("Upgrade", &[("Id", upgrade_code.as_str())]);
    w.empty(
        "UpgradeVersion",
        &[
            ("Minimum", "0.0.0"),
            ("Property", PREVIOUS_VERSIONS_PROPERTY),
            ("IncludeMinimum", "yes"),
            ("IncludeMaximum", "yes"),
        ],
    );
    w.end();

    w.start("InstallExecuteSequence", &[]);
    w.empty("RemoveExistingProducts", &[("Before", "InstallInitialize")]);
    w.end();

    let description = product
        .description
        .clone()
        .unwrap_or_else(|| "Windows Installer Package".to_string());
    w.empty(
        "Package",
        &[
            ("InstallerVersion", "200"),
            ("Compressed", "yes"),
            ("Comments", description.as_str()),
            ("InstallScope", product.scope.as_str()),
        ],
    );
    w.empty(
        "Media",
        &[("Id", "1"), ("Cabinet", "app.cab"), ("EmbedCab", "yes")],
    );

    if let Some(icon) = &product.icon {
        let source = icon.to_string_lossy();
        w.empty("Icon", &[("Id", ICON_ID), ("SourceFile", &*source)]);
    }

    write_directory_chain(&mut w, doc);

    w.start("Feature", &[("Id", FEATURE_ID), ("Level", "1")]);
    for id in doc.feature_refs() {
        w.empty("ComponentRef", &[("Id", id.as_str())]);
    }
    w.end();

    w.end(); // Product
    w.end(); // Wix
    w.finish()
}

fn write_directory_chain(w: &mut XmlWriter, doc: &ManifestDocument) {
    let links = doc.directories.links();
    for (depth, link) in links.iter().enumerate() {
        open_link(w, link);
        if depth == 0 && link.id == TARGET_DIR_ID && doc.tree.shortcut_count() > 0 {
            for kind in ShortcutKind::ALL {
                w.empty("Directory", &[("Id", kind.target_folder())]);
            }
        }
        if link.id == INSTALL_DIR_ID {
            write_directory_contents(w, &doc.tree.root, doc);
        }
    }
    for _ in links {
        w.end();
    }
}

fn open_link(w: &mut XmlWriter, link: &DirectoryLink) {
    match &link.name {
        Some(name) => w.start("Directory", &[("Id", link.id.as_str()), ("Name", name.as_str())]),
        None => w.start("Directory", &[("Id", link.id.as_str())]),
    }
}

fn write_directory_contents(w: &mut XmlWriter, dir: &DirectoryEntry, doc: &ManifestDocument) {
    for file in &dir.files {
        write_component(w, file, doc);
    }
    for sub in &dir.subdirectories {
        w.start("Directory", &[("Id", sub.id.as_str()), ("Name", sub.name.as_str())]);
        write_directory_contents(w, sub, doc);
        w.end();
    }
}

fn write_component(w: &mut XmlWriter, file: &FileEntry, doc: &ManifestDocument) {
    let guid = doc
        .component_guid(&file.id)
        .map(|g| format_guid(&g))
        .unwrap_or_else(|| "*".to_string());
    let source = file.source.to_string_lossy();
    let file_attrs = [
        ("Id", file.id.as_str()),
        ("Source", &*source),
        ("Name", file.name.as_str()),
    ];

    w.start("Component", &[("Id", file.id.as_str()), ("Guid", guid.as_str())]);
    if file.shortcuts.is_empty() {
        w.empty("File", &file_attrs);
    } else {
        w.start("File", &file_attrs);
        for shortcut in &file.shortcuts {
            let mut attrs = vec![
                ("Id", shortcut.kind.id()),
                ("Directory", shortcut.kind.target_folder()),
                ("Name", shortcut.display_name.as_str()),
                ("Description", shortcut.description.as_str()),
                ("WorkingDirectory", INSTALL_DIR_ID),
                ("Advertise", "yes"),
            ];
            if doc.product.icon.is_some() {
                attrs.push(("Icon", ICON_ID));
            }
            w.empty("Shortcut", &attrs);
        }
        w.end();
    }
    w.end();
}
