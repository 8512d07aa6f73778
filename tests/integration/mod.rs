//! Integration tests for the winpkg manifest compiler

mod cli;
mod config_layers;
mod install_location;
mod manifest_structure;
mod regeneration;
mod shortcuts;
