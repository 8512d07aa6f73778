//! Configuration System
//!
//! Package options are merged from defaults, config files, environment
//! variables and CLI flags into a raw [`PackageOptions`] value, then validated
//! once into a [`PackageConfig`] before any generation begins.

use crate::logging::LoggingConfig;
use crate::manifest::guid::{default_upgrade_code, GuidMode};
use crate::tree::walker::EntryPolicy;
use crate::types::Architecture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

pub use crate::linker::LinkerConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WinpkgConfig {
    /// Package options
    #[serde(default)]
    pub package: PackageOptions,

    /// External linker settings
    #[serde(default)]
    pub linker: LinkerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Unvalidated package options as they come from files, environment and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageOptions {
    /// Directory whose contents are packaged
    pub source: Option<PathBuf>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub upgrade_code: Option<String>,
    /// `x86` or `x64`
    pub arch: Option<String>,
    pub icon: Option<PathBuf>,
    /// Installation directory name (defaults to the product name)
    pub install_dir: Option<String>,
    /// Substring identifying the launcher that receives shortcuts
    pub executable: Option<String>,
    pub root_install: Option<bool>,
    pub local: Option<bool>,
    /// `random` or `stable`
    pub guids: Option<String>,
    /// `skip`, `follow` or `reject`
    pub entry_policy: Option<String>,
    /// Entry names left out of the walk
    pub ignore: Option<Vec<String>>,
}

/// Validated package configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PackageConfig {
    /// Canonical, absolute source root
    pub source: PathBuf,
    pub name: String,
    pub manufacturer: String,
    pub version: String,
    pub description: Option<String>,
    pub upgrade_code: Uuid,
    pub arch: Architecture,
    pub icon: Option<PathBuf>,
    pub install_dir: String,
    pub executable: Option<String>,
    pub root_install: bool,
    pub local: bool,
    pub guids: GuidMode,
    pub entry_policy: EntryPolicy,
    pub ignore: Vec<String>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Missing(field) => write!(f, "'{}' is required", field),
            ValidationError::Invalid(field, msg) => write!(f, "'{}': {}", field, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Join validation errors into one message
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl PackageOptions {
    /// Overlay `overrides` on top of `self`; any value set in `overrides` wins
    pub fn merge(self, overrides: PackageOptions) -> PackageOptions {
        PackageOptions {
            source: overrides.source.or(self.source),
            name: overrides.name.or(self.name),
            manufacturer: overrides.manufacturer.or(self.manufacturer),
            version: overrides.version.or(self.version),
            description: overrides.description.or(self.description),
            upgrade_code: overrides.upgrade_code.or(self.upgrade_code),
            arch: overrides.arch.or(self.arch),
            icon: overrides.icon.or(self.icon),
            install_dir: overrides.install_dir.or(self.install_dir),
            executable: overrides.executable.or(self.executable),
            root_install: overrides.root_install.or(self.root_install),
            local: overrides.local.or(self.local),
            guids: overrides.guids.or(self.guids),
            entry_policy: overrides.entry_policy.or(self.entry_policy),
            ignore: overrides.ignore.or(self.ignore),
        }
    }

    /// Validate every field, collecting all problems instead of stopping at the first
    pub fn validate(self) -> Result<PackageConfig, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let source = self.source.unwrap_or_else(|| PathBuf::from("."));
        let source = match dunce::canonicalize(&source) {
            Ok(path) if path.is_dir() => Some(path),
            Ok(path) => {
                errors.push(ValidationError::Invalid(
                    "source",
                    format!("{} is not a directory", path.display()),
                ));
                None
            }
            Err(e) => {
                errors.push(ValidationError::Invalid(
                    "source",
                    format!("{}: {}", source.display(), e),
                ));
                None
            }
        };

        let name = required("name", self.name, &mut errors);
        let manufacturer = required("manufacturer", self.manufacturer, &mut errors);
        let version = required("version", self.version, &mut errors);
        if let Some(version) = &version {
            if let Err(msg) = validate_version(version) {
                errors.push(ValidationError::Invalid("version", msg));
            }
        }

        let arch = parse_or_default("arch", self.arch, &mut errors);
        let guids = parse_or_default("guids", self.guids, &mut errors);
        let entry_policy = parse_or_default("entry_policy", self.entry_policy, &mut errors);

        let upgrade_code = match self.upgrade_code.filter(|c| !c.trim().is_empty()) {
            Some(code) => match Uuid::parse_str(code.trim()) {
                Ok(uuid) => Some(uuid),
                Err(e) => {
                    errors.push(ValidationError::Invalid("upgrade_code", e.to_string()));
                    None
                }
            },
            None => name.as_deref().map(default_upgrade_code),
        };

        let icon = match self.icon {
            Some(icon) => match dunce::canonicalize(&icon) {
                Ok(path) if path.is_file() => Some(path),
                _ => {
                    errors.push(ValidationError::Invalid(
                        "icon",
                        format!("{} is not a readable file", icon.display()),
                    ));
                    None
                }
            },
            None => None,
        };

        let install_dir = self
            .install_dir
            .filter(|d| !d.trim().is_empty())
            .or_else(|| name.clone());
        if let Some(dir) = &install_dir {
            if dir.contains(['/', '\\']) {
                errors.push(ValidationError::Invalid(
                    "install_dir",
                    "must be a single directory name".to_string(),
                ));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Each None here has already been reported above.
        let missing = |field: &'static str| vec![ValidationError::Missing(field)];
        Ok(PackageConfig {
            source: source.ok_or_else(|| missing("source"))?,
            name: name.ok_or_else(|| missing("name"))?,
            manufacturer: manufacturer.ok_or_else(|| missing("manufacturer"))?,
            version: version.ok_or_else(|| missing("version"))?,
            description: self.description.filter(|d| !d.trim().is_empty()),
            upgrade_code: upgrade_code.ok_or_else(|| missing("upgrade_code"))?,
            arch,
            icon,
            install_dir: install_dir.ok_or_else(|| missing("install_dir"))?,
            executable: self.executable.filter(|e| !e.is_empty()),
            root_install: self.root_install.unwrap_or(false),
            local: self.local.unwrap_or(false),
            guids,
            entry_policy,
            ignore: self.ignore.unwrap_or_default(),
        })
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Some(v),
        None => {
            errors.push(ValidationError::Missing(field));
            None
        }
    }
}

fn parse_or_default<T>(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<ValidationError>,
) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|msg| {
            errors.push(ValidationError::Invalid(field, msg));
            T::default()
        }),
        None => T::default(),
    }
}

/// Installer versions are one to four dot-separated integers
fn validate_version(version: &str) -> Result<(), String> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 4 {
        return Err(format!("{} has more than four fields", version));
    }
    for part in parts {
        if part.is_empty() || part.parse::<u32>().map_or(true, |n| n > 65535) {
            return Err(format!(
                "{} must be dot-separated integers between 0 and 65535",
                version
            ));
        }
    }
    Ok(())
}
