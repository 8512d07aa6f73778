//! Single-level directory enumeration

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// How entries that are neither regular files nor directories are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPolicy {
    /// Exclude symlinks and special files, reporting them as skipped
    #[default]
    Skip,
    /// Classify symlinks by their target; special files and dangling links are still skipped
    Follow,
    /// Fail on the first symlink or special file
    Reject,
}

impl std::str::FromStr for EntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(EntryPolicy::Skip),
            "follow" => Ok(EntryPolicy::Follow),
            "reject" => Ok(EntryPolicy::Reject),
            other => Err(format!(
                "Invalid entry policy: {} (must be 'skip', 'follow', or 'reject')",
                other
            )),
        }
    }
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    pub entry_policy: EntryPolicy,
    /// Entry names to leave out of the listing (exact match)
    pub ignore_names: Vec<String>,
}

/// The immediate children of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Regular file names, lexically ordered
    pub files: Vec<String>,
    /// Subdirectory names, lexically ordered
    pub directories: Vec<String>,
    /// Entries excluded as unsupported
    pub unsupported: Vec<PathBuf>,
}

/// Filesystem walker
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// List one level of `dir`
    ///
    /// Entries are sorted by file name, so repeated calls over an unchanged
    /// directory return identical listings.
    pub fn list(&self, dir: &Path) -> Result<Listing, TreeError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.entry_policy == EntryPolicy::Follow)
            .sort_by_file_name();

        let mut listing = Listing::default();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => match dangling_link(&e) {
                    Some(path) => {
                        let ignored = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| self.should_ignore(n));
                        if !ignored {
                            self.unsupported(path, &mut listing)?;
                        }
                        continue;
                    }
                    None => {
                        let path = e
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| dir.to_path_buf());
                        let source = e.into_io_error().unwrap_or_else(|| {
                            std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected")
                        });
                        return Err(TreeError::walk(path, source));
                    }
                },
            };

            let name = entry.file_name().to_str().ok_or_else(|| {
                TreeError::InvalidPath(format!("{:?} is not valid UTF-8", entry.path()))
            })?;

            if self.should_ignore(name) {
                trace!(path = %entry.path().display(), "Ignoring entry");
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_file() {
                listing.files.push(name.to_string());
            } else if file_type.is_dir() {
                listing.directories.push(name.to_string());
            } else {
                self.unsupported(entry.path().to_path_buf(), &mut listing)?;
            }
        }

        Ok(listing)
    }

    fn should_ignore(&self, name: &str) -> bool {
        self.config.ignore_names.iter().any(|n| n == name)
    }

    /// Record an entry that is neither a regular file nor a directory
    fn unsupported(&self, path: PathBuf, listing: &mut Listing) -> Result<(), TreeError> {
        if self.config.entry_policy == EntryPolicy::Reject {
            return Err(TreeError::UnsupportedEntry { path });
        }
        warn!(path = %path.display(), "Skipping unsupported entry");
        listing.unsupported.push(path);
        Ok(())
    }
}

/// Path of a symlink whose target is missing, when that is what `err` reports
fn dangling_link(err: &walkdir::Error) -> Option<PathBuf> {
    let path = err.path()?;
    if err.io_error()?.kind() != std::io::ErrorKind::NotFound {
        return None;
    }
    std::fs::symlink_metadata(path)
        .ok()
        .filter(|meta| meta.file_type().is_symlink())
        .map(|_| path.to_path_buf())
}
