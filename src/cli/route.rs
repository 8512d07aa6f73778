//! CLI route: single route table and run context. Dispatches to the package pipeline and presentation.

use crate::cli::parse::{Commands, PackageArgs};
use crate::cli::presentation::{format_build_report, format_inspect, format_manifest_written};
use crate::config::{format_validation_errors, ConfigLoader, PackageConfig, WinpkgConfig};
use crate::error::PackageError;
use crate::linker::WixlLinker;
use crate::package::{self, BuildOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: project directory and loaded configuration.
pub struct RunContext {
    project_dir: PathBuf,
    config: WinpkgConfig,
}

impl RunContext {
    /// Create run context from the project directory and optional explicit config file.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PackageError> {
        let config = ConfigLoader::load(&project_dir, config_path.as_deref())?;
        Ok(Self {
            project_dir,
            config,
        })
    }

    /// Create run context from an already-loaded configuration.
    pub fn with_config(project_dir: PathBuf, config: WinpkgConfig) -> Self {
        Self {
            project_dir,
            config,
        }
    }

    /// Loaded configuration (before CLI flags are applied).
    pub fn config(&self) -> &WinpkgConfig {
        &self.config
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Execute a command and return the text to print on success.
    pub fn execute(&self, command: &Commands) -> Result<String, PackageError> {
        let start = Instant::now();
        let result = match command {
            Commands::Build {
                package,
                output,
                linker,
                keep_manifest,
            } => self.handle_build(package, output, linker.as_deref(), keep_manifest.as_deref()),
            Commands::Manifest { package, output } => self.handle_manifest(package, output),
            Commands::Inspect { package, format } => self.handle_inspect(package, format),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    /// Merge CLI flags over the loaded options and validate once.
    pub fn package_config(&self, args: &PackageArgs) -> Result<PackageConfig, PackageError> {
        self.config
            .package
            .clone()
            .merge(args.to_options())
            .validate()
            .map_err(|errors| PackageError::Config(format_validation_errors(&errors)))
    }

    fn handle_build(
        &self,
        args: &PackageArgs,
        output: &Path,
        linker_program: Option<&str>,
        keep_manifest: Option<&Path>,
    ) -> Result<String, PackageError> {
        let config = self.package_config(args)?;
        let mut linker_config = self.config.linker.clone();
        if let Some(program) = linker_program {
            linker_config.program = program.to_string();
        }
        let linker = WixlLinker::new(linker_config);
        let options = BuildOptions {
            output: output.to_path_buf(),
            temp_dir: None,
            keep_manifest: keep_manifest.map(Path::to_path_buf),
        };
        let report = package::build_package(&config, &linker, &options)?;
        Ok(format_build_report(&report))
    }

    fn handle_manifest(&self, args: &PackageArgs, output: &Path) -> Result<String, PackageError> {
        let config = self.package_config(args)?;
        if output == Path::new("-") {
            let doc = package::assemble(&config, None)?;
            return Ok(doc.to_xml());
        }
        let doc = package::write_manifest(&config, output)?;
        Ok(format_manifest_written(&doc, output))
    }

    fn handle_inspect(&self, args: &PackageArgs, format: &str) -> Result<String, PackageError> {
        let config = self.package_config(args)?;
        let doc = package::assemble(&config, None)?;
        format_inspect(&doc, format)
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Manifest { .. } => "manifest",
        Commands::Inspect { .. } => "inspect",
    }
}
