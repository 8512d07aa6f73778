//! External Linker
//!
//! The linker turns a manifest into an installer package. It is treated as an
//! opaque executable: only its exit status and captured output are used.

use crate::error::PackageError;
use crate::types::Architecture;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info, instrument};

/// Linker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments inserted before the manifest path
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_program() -> String {
    "wixl".to_string()
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            extra_args: Vec::new(),
        }
    }
}

/// What to link and where to put the result
#[derive(Debug, Clone, Copy)]
pub struct LinkRequest<'a> {
    pub manifest: &'a Path,
    pub arch: Architecture,
    pub output: &'a Path,
}

/// Outcome of a successful link
#[derive(Debug, Clone)]
pub struct LinkReport {
    pub output: PathBuf,
    pub stdout: String,
    pub stderr: String,
}

/// Turns a manifest file into a package
pub trait PackageLinker {
    fn link(&self, request: &LinkRequest<'_>) -> Result<LinkReport, PackageError>;
}

/// Runs `wixl` (or a compatible executable)
#[derive(Debug, Clone, Default)]
pub struct WixlLinker {
    config: LinkerConfig,
}

impl WixlLinker {
    pub fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    /// Full command for a request: `<program> <extra args> <manifest> -a <arch> -o <output>`
    pub fn command(&self, request: &LinkRequest<'_>) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.extra_args)
            .arg(request.manifest)
            .arg("-a")
            .arg(request.arch.as_str())
            .arg("-o")
            .arg(request.output);
        command
    }
}

impl PackageLinker for WixlLinker {
    #[instrument(skip(self), fields(program = %self.config.program))]
    fn link(&self, request: &LinkRequest<'_>) -> Result<LinkReport, PackageError> {
        info!(output = %request.output.display(), "Invoking linker");

        let output = self.command(request).output().map_err(|e| {
            error!("Failed to start linker: {}", e);
            PackageError::LinkerInvocation {
                program: self.config.program.clone(),
                status: None,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stdout.is_empty() {
            debug!(stdout = %stdout.trim_end(), "Linker output");
        }

        if !output.status.success() {
            error!(status = ?output.status.code(), "Linker exited with failure");
            return Err(PackageError::LinkerInvocation {
                program: self.config.program.clone(),
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(LinkReport {
            output: request.output.to_path_buf(),
            stdout,
            stderr,
        })
    }
}
