//! Project config file source: `winpkg.toml` and `winpkg.{env}.toml` in a project directory

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Base project config file name
pub const PROJECT_CONFIG_FILE: &str = "winpkg.toml";

/// Add project config files to builder.
/// Precedence: winpkg.toml (base) then winpkg.{WINPKG_ENV}.toml (env-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = project_dir.join(PROJECT_CONFIG_FILE);
    if base_config_path.exists() {
        debug!(config_path = %base_config_path.display(), "Loading project configuration");
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    if let Ok(env_name) = std::env::var("WINPKG_ENV") {
        let env_config_path = project_dir.join(format!("winpkg.{}.toml", env_name));
        if env_config_path.exists() {
            debug!(config_path = %env_config_path.display(), "Loading environment configuration");
            builder = builder.add_source(File::from(env_config_path).required(false));
        }
    }

    Ok(builder)
}
