//! winpkg CLI Binary
//!
//! Command-line interface for compiling a directory tree into a Windows installer.

use clap::Parser;
use std::process;
use tracing::{error, info};
use winpkg::cli::{Cli, RunContext};
use winpkg::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let project_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to determine the current directory: {}", e);
            process::exit(1);
        }
    };

    // Load config first so the logging section applies; report a load failure after logging is up
    let context = RunContext::new(project_dir, cli.config.clone());
    let base = context
        .as_ref()
        .map(|ctx| ctx.config().logging.clone())
        .unwrap_or_default();
    let logging_config = build_logging_config(&cli, &base);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("winpkg starting");

    let context = match context {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", winpkg::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", winpkg::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Fold CLI logging flags over the configured logging section.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
