//! Source Tree Compilation
//!
//! Turns a directory on disk into a tree of components, one per file, with
//! identifiers derived from each entry's path relative to the source root.

pub mod builder;
pub mod id;
pub mod node;
pub mod shortcut;
pub mod walker;

pub use builder::{ComponentBuilder, ComponentTree, INSTALL_DIR_ID};
pub use node::{DirectoryEntry, FileEntry};
pub use shortcut::{ShortcutAttacher, ShortcutDescriptor, ShortcutKind};
pub use walker::{EntryPolicy, Listing, Walker, WalkerConfig};
