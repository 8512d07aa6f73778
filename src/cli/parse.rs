//! CLI parse: clap types for winpkg. No behavior beyond mapping flags to options.

use crate::config::PackageOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// winpkg - compile a directory tree into a Windows installer
#[derive(Parser, Debug)]
#[command(name = "winpkg")]
#[command(about = "Compile a directory tree into a WiX manifest and link it into an MSI package")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over winpkg.toml and the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the manifest and link it into an .msi package
    Build {
        #[command(flatten)]
        package: PackageArgs,

        /// Output package path
        #[arg(short, long, default_value = "/tmp/output.msi")]
        output: PathBuf,

        /// Linker executable (default: wixl)
        #[arg(long)]
        linker: Option<String>,

        /// Save a copy of the generated manifest
        #[arg(long)]
        keep_manifest: Option<PathBuf>,
    },
    /// Write the WiX manifest without linking
    Manifest {
        #[command(flatten)]
        package: PackageArgs,

        /// Output manifest path ("-" for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
    /// List the components that would be packaged
    Inspect {
        #[command(flatten)]
        package: PackageArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Package options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct PackageArgs {
    /// Your sources directory path (default: .)
    pub sources: Option<PathBuf>,

    /// Architecture of the output package (x86 or x64)
    #[arg(short, long)]
    pub arch: Option<String>,

    /// Name of the manufacturer
    #[arg(short, long)]
    pub manufacturer: Option<String>,

    /// Name of the app
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path fragment of the file to create shortcuts for
    #[arg(short, long)]
    pub executable: Option<String>,

    /// Shortcut description (defaults to the manufacturer)
    #[arg(long)]
    pub description: Option<String>,

    /// The upgrade code (derived from the app name if not specified)
    #[arg(short, long)]
    pub upgrade_code: Option<String>,

    /// Version number
    #[arg(short = 'v', long)]
    pub version: Option<String>,

    /// The icon.ico path
    #[arg(short, long)]
    pub icon: Option<PathBuf>,

    /// The installation directory name (defaults to the app name)
    #[arg(short = 'd', long)]
    pub install_dir: Option<String>,

    /// Install the program directly under the drive root
    #[arg(short, long)]
    pub root_install: bool,

    /// Local user install (in AppData)
    #[arg(short, long)]
    pub local: bool,

    /// Derive component GUIDs from their identifiers instead of generating fresh ones
    #[arg(long)]
    pub stable_guids: bool,

    /// Follow symbolic links instead of skipping them
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl PackageArgs {
    /// Options set on the command line; unset flags stay `None` so config files apply
    pub fn to_options(&self) -> PackageOptions {
        PackageOptions {
            source: self.sources.clone(),
            name: self.name.clone(),
            manufacturer: self.manufacturer.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            upgrade_code: self.upgrade_code.clone(),
            arch: self.arch.clone(),
            icon: self.icon.clone(),
            install_dir: self.install_dir.clone(),
            executable: self.executable.clone(),
            root_install: self.root_install.then_some(true),
            local: self.local.then_some(true),
            guids: self.stable_guids.then(|| "stable".to_string()),
            entry_policy: self.follow_symlinks.then(|| "follow".to_string()),
            ignore: None,
        }
    }
}
