//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones: defaults, global file, project file,
/// explicit file, environment. CLI flags are overlaid after deserialization.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("package.source", ".")?
        .set_default("package.arch", "x86")?
        .set_default("package.guids", "random")?
        .set_default("package.entry_policy", "skip")?
        .set_default("linker.program", "wixl")
}
