//! Package pipeline: assemble the manifest, hand it to the linker, clean up.

use crate::config::PackageConfig;
use crate::error::PackageError;
use crate::linker::{LinkRequest, PackageLinker};
use crate::manifest::{GuidGenerator, ManifestAssembler, ManifestDocument};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Options for one `build_package` run
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Where the linker writes the package
    pub output: PathBuf,
    /// Directory for the temporary manifest (system temp dir by default)
    pub temp_dir: Option<PathBuf>,
    /// Also save a copy of the manifest here
    pub keep_manifest: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            temp_dir: None,
            keep_manifest: None,
        }
    }
}

/// Summary of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub components: usize,
    pub shortcuts: usize,
    pub skipped: Vec<PathBuf>,
    pub duration_ms: u128,
}

/// Assemble the manifest for `config`
pub fn assemble(
    config: &PackageConfig,
    guids: Option<Box<dyn GuidGenerator>>,
) -> Result<ManifestDocument, PackageError> {
    let assembler = ManifestAssembler::new(config);
    let assembler = match guids {
        Some(guids) => assembler.with_guid_generator(guids),
        None => assembler,
    };
    assembler.assemble()
}

/// Generate the manifest and link it into a package
///
/// The manifest lives in a temporary file for the duration of the link and
/// is removed afterwards whether or not the linker succeeded.
#[instrument(skip(config, linker, options), fields(product = %config.name))]
pub fn build_package(
    config: &PackageConfig,
    linker: &dyn PackageLinker,
    options: &BuildOptions,
) -> Result<BuildReport, PackageError> {
    let start = Instant::now();
    info!("Start generation");

    let doc = assemble(config, None)?;

    if let Some(path) = &options.keep_manifest {
        doc.write_to(path)?;
        info!(path = %path.display(), "Saved manifest copy");
    }

    let temp_dir = options
        .temp_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let manifest = doc.write_temp(&temp_dir)?;

    let report = linker.link(&LinkRequest {
        manifest: manifest.path(),
        arch: config.arch,
        output: &options.output,
    });

    let manifest_path = manifest.path().to_path_buf();
    if let Err(e) = manifest.close() {
        warn!(path = %manifest_path.display(), "Failed to remove temporary manifest: {}", e);
    }
    let report = report?;

    let duration_ms = start.elapsed().as_millis();
    info!(output = %report.output.display(), duration_ms, "Generation succeeded");

    Ok(BuildReport {
        output: report.output,
        components: doc.feature_refs().len(),
        shortcuts: doc.tree.shortcut_count(),
        skipped: doc.tree.unsupported.clone(),
        duration_ms,
    })
}

/// Generate the manifest and write it to `path`
pub fn write_manifest(config: &PackageConfig, path: &Path) -> Result<ManifestDocument, PackageError> {
    let doc = assemble(config, None)?;
    doc.write_to(path)?;
    info!(path = %path.display(), components = doc.feature_refs().len(), "Manifest written");
    Ok(doc)
}
