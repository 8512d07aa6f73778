//! Component tree builder
//!
//! Walks the source root one level at a time and recursively assembles the
//! [`DirectoryEntry`] tree. The flat list of component identifiers needed for
//! feature registration is accumulated in the same pass.

use crate::error::TreeError;
use crate::manifest::xml::is_xml_char;
use crate::tree::id;
use crate::tree::node::{DirectoryEntry, FileEntry};
use crate::tree::shortcut::ShortcutAttacher;
use crate::tree::walker::{EntryPolicy, Walker, WalkerConfig};
use crate::types::EntryId;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Identifier of the directory that receives the source root's contents
pub const INSTALL_DIR_ID: &str = "INSTALLDIR";

/// Result of building the component tree for a source root
#[derive(Debug, Clone)]
pub struct ComponentTree {
    /// The source root itself, identified as [`INSTALL_DIR_ID`]
    pub root: DirectoryEntry,
    /// Every file identifier in the tree, files before subdirectories, depth first
    pub component_ids: Vec<EntryId>,
    /// Symlinks and special files that were left out
    pub unsupported: Vec<PathBuf>,
}

impl ComponentTree {
    pub fn shortcut_count(&self) -> usize {
        self.root.iter_files().map(|f| f.shortcuts.len()).sum()
    }
}

/// Builds a [`ComponentTree`] from a directory on disk
pub struct ComponentBuilder {
    root: PathBuf,
    walker: Walker,
    shortcuts: ShortcutAttacher,
}

/// Mutable state threaded through one build
struct BuildState {
    component_ids: Vec<EntryId>,
    unsupported: Vec<PathBuf>,
    /// Canonical paths of the directories currently being visited
    ancestors: Vec<PathBuf>,
}

impl ComponentBuilder {
    /// Create a builder for `root` with the default walker and no shortcuts
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker: Walker::new(),
            shortcuts: ShortcutAttacher::disabled(),
        }
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = Walker::with_config(config);
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: ShortcutAttacher) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Build the complete component tree
    ///
    /// Any walk or identifier error aborts the build; no partial tree is returned.
    #[instrument(skip(self), fields(source = %self.root.display()))]
    pub fn build(&self) -> Result<ComponentTree, TreeError> {
        let start = Instant::now();
        info!("Starting component tree build");

        check_representable(&self.root)?;

        // Shortcut match counts are per build.
        let mut shortcuts = self.shortcuts.clone();
        let mut state = BuildState {
            component_ids: Vec::new(),
            unsupported: Vec::new(),
            ancestors: Vec::new(),
        };

        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = self.build_directory(
            &self.root,
            EntryId::well_known(INSTALL_DIR_ID),
            name,
            &mut shortcuts,
            &mut state,
        )?;

        info!(
            files = state.component_ids.len(),
            directories = root.directory_count(),
            skipped = state.unsupported.len(),
            shortcut_targets = shortcuts.matched(),
            duration_ms = start.elapsed().as_millis(),
            "Component tree built"
        );

        Ok(ComponentTree {
            root,
            component_ids: state.component_ids,
            unsupported: state.unsupported,
        })
    }

    fn build_directory(
        &self,
        dir: &Path,
        id: EntryId,
        name: String,
        shortcuts: &mut ShortcutAttacher,
        state: &mut BuildState,
    ) -> Result<DirectoryEntry, TreeError> {
        let following = self.walker.config().entry_policy == EntryPolicy::Follow;
        if following {
            let canonical = dunce::canonicalize(dir).map_err(|e| TreeError::walk(dir, e))?;
            if state.ancestors.contains(&canonical) {
                return Err(TreeError::SymlinkCycle {
                    path: dir.to_path_buf(),
                });
            }
            state.ancestors.push(canonical);
        }

        let listing = self.walker.list(dir)?;
        debug!(
            path = %dir.display(),
            files = listing.files.len(),
            directories = listing.directories.len(),
            "Listed directory"
        );
        state.unsupported.extend(listing.unsupported);

        let mut files = Vec::with_capacity(listing.files.len());
        for file_name in listing.files {
            let source = dir.join(&file_name);
            check_representable(&source)?;
            let file_id = id::encode(&self.root, &source)?;
            let mut entry = FileEntry {
                id: file_id.clone(),
                relative_path: source
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or_default(),
                source,
                name: file_name,
                shortcuts: Vec::new(),
            };
            shortcuts.attach(&mut entry);
            state.component_ids.push(file_id);
            files.push(entry);
        }

        let mut subdirectories = Vec::with_capacity(listing.directories.len());
        for dir_name in listing.directories {
            let path = dir.join(&dir_name);
            check_representable(&path)?;
            let dir_id = id::encode(&self.root, &path)?;
            subdirectories.push(self.build_directory(&path, dir_id, dir_name, shortcuts, state)?);
        }

        if following {
            state.ancestors.pop();
        }

        Ok(DirectoryEntry {
            id,
            name,
            files,
            subdirectories,
        })
    }
}

/// Paths end up in manifest attributes; reject characters XML 1.0 cannot carry
fn check_representable(path: &Path) -> Result<(), TreeError> {
    if path.to_string_lossy().chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(TreeError::InvalidPath(format!(
            "{:?} contains characters that cannot appear in a manifest",
            path
        )))
    }
}
