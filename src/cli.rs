//! CLI domain: parse, route, output, and presentation only.
//! Packaging itself lives in [`crate::package`]; the route table only dispatches.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, PackageArgs};
pub use presentation::{format_build_report, format_inspect, format_manifest_written};
pub use route::RunContext;
