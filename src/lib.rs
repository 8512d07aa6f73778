//! winpkg: Directory Tree to Windows Installer Compiler
//!
//! Walks a source directory, turns every regular file into an installable
//! component with a stable identifier, wraps the tree in product metadata and
//! an install-location chain, and emits a WiX manifest that an external
//! linker (`wixl` by default) turns into an `.msi` package.

pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod tree;
pub mod types;
