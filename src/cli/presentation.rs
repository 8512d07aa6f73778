//! CLI presentation: formatting of command results for the terminal.

use crate::error::PackageError;
use crate::manifest::ManifestDocument;
use crate::package::BuildReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_build_report(report: &BuildReport) -> String {
    let mut s = format!(
        "{}\n  Components: {}\n  Shortcuts: {}",
        "Generation has succeeded".green().bold(),
        report.components,
        report.shortcuts
    );
    append_skipped(&mut s, &report.skipped);
    s.push_str(&format!(
        "\nYou can find your .msi at \"{}\"",
        report.output.display()
    ));
    s
}

pub fn format_manifest_written(doc: &ManifestDocument, path: &Path) -> String {
    let mut s = format!(
        "Manifest written to \"{}\"\n  Components: {}\n  Install chain: {}",
        path.display(),
        doc.feature_refs().len(),
        doc.directories.ids().join(" → ")
    );
    append_skipped(&mut s, &doc.tree.unsupported);
    s
}

pub fn format_inspect(doc: &ManifestDocument, format: &str) -> Result<String, PackageError> {
    match format {
        "json" => format_inspect_json(doc),
        "text" => Ok(format_inspect_text(doc)),
        other => Err(PackageError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn format_inspect_text(doc: &ManifestDocument) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Component", "Path", "Shortcuts"]);
    for file in doc.tree.root.iter_files() {
        let shortcuts = if file.shortcuts.is_empty() {
            "-".to_string()
        } else {
            file.shortcuts
                .iter()
                .map(|s| s.kind.target_folder())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            file.id.to_string(),
            file.relative_path.display().to_string(),
            shortcuts,
        ]);
    }

    let mut s = format!(
        "{} {} ({})\n  Install chain: {}\n  Components: {}\n{}",
        doc.product.name.bold(),
        doc.product.version,
        doc.product.scope.as_str(),
        doc.directories.ids().join(" → "),
        doc.feature_refs().len(),
        table
    );
    append_skipped(&mut s, &doc.tree.unsupported);
    s
}

fn format_inspect_json(doc: &ManifestDocument) -> Result<String, PackageError> {
    let out = serde_json::json!({
        "product": {
            "name": doc.product.name,
            "version": doc.product.version,
            "manufacturer": doc.product.manufacturer,
            "upgrade_code": doc.product.upgrade_code,
            "arch": doc.product.arch,
            "scope": doc.product.scope,
        },
        "install_chain": doc.directories.ids(),
        "root": doc.tree.root,
        "components": doc.feature_refs(),
        "skipped": doc.tree.unsupported,
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| PackageError::Config(format!("Failed to serialize output: {}", e)))
}

fn append_skipped(s: &mut String, skipped: &[std::path::PathBuf]) {
    if skipped.is_empty() {
        return;
    }
    s.push_str(&format!(
        "\n\n{} ({}):",
        "Skipped unsupported entries".yellow(),
        skipped.len()
    ));
    for path in skipped {
        s.push_str(&format!("\n  - {}", path.display()));
    }
}
