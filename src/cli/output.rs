//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::PackageError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &PackageError) -> String {
    match e {
        PackageError::LinkerInvocation { stdout, .. } if !stdout.trim().is_empty() => {
            format!("{}\n{}", e, stdout.trim_end())
        }
        _ => e.to_string(),
    }
}
