//! Component tree node types

use crate::tree::shortcut::ShortcutDescriptor;
use crate::types::EntryId;
use serde::Serialize;
use std::path::PathBuf;

/// A regular file, packaged as exactly one component whose id equals the file id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub id: EntryId,
    /// Path relative to the source root
    pub relative_path: PathBuf,
    /// Absolute path the linker reads the file from
    pub source: PathBuf,
    /// File name as installed
    pub name: String,
    pub shortcuts: Vec<ShortcutDescriptor>,
}

/// A directory and the entries found directly inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub id: EntryId,
    pub name: String,
    pub files: Vec<FileEntry>,
    pub subdirectories: Vec<DirectoryEntry>,
}

impl DirectoryEntry {
    /// Number of files in this directory and all nested directories
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryEntry::file_count)
                .sum::<usize>()
    }

    /// Number of nested directories (excluding this one)
    pub fn directory_count(&self) -> usize {
        self.subdirectories.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryEntry::directory_count)
                .sum::<usize>()
    }

    /// Depth-first iterator over every file in the subtree
    pub fn iter_files(&self) -> Box<dyn Iterator<Item = &FileEntry> + '_> {
        Box::new(
            self.files
                .iter()
                .chain(self.subdirectories.iter().flat_map(|d| d.iter_files())),
        )
    }

    /// Find a direct subdirectory by name
    pub fn subdirectory(&self, name: &str) -> Option<&DirectoryEntry> {
        self.subdirectories.iter().find(|d| d.name == name)
    }
}
