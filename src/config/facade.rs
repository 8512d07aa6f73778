//! Config loading facade: assembles sources in precedence order and deserializes.

use super::merge::merge_policy;
use super::sources::{global_file, project_file};
use super::WinpkgConfig;
use crate::error::PackageError;
use config::{Environment, File};
use std::path::Path;
use tracing::debug;

/// Loads [`WinpkgConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project directory
    ///
    /// Sources, lowest precedence first: defaults, the global config file,
    /// `winpkg.toml` (and `winpkg.{WINPKG_ENV}.toml`) in `project_dir`, the
    /// explicit `config_file` if any, then `WINPKG__SECTION__KEY` environment
    /// variables.
    pub fn load(project_dir: &Path, config_file: Option<&Path>) -> Result<WinpkgConfig, PackageError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        builder = project_file::add_to_builder(builder, project_dir)?;

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(PackageError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            debug!(config_path = %path.display(), "Loading explicit configuration");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("WINPKG")
                .prefix_separator("__")
                .separator("__"),
        );

        let config = builder.build()?.try_deserialize::<WinpkgConfig>()?;
        Ok(config)
    }

    /// Load a single TOML file without defaults or other sources
    pub fn load_from_file(path: &Path) -> Result<WinpkgConfig, PackageError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PackageError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}
