//! Shortcut attachment for the designated launcher executable

use crate::tree::node::FileEntry;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// The fixed set of shortcuts a launcher receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShortcutKind {
    StartMenu,
    Desktop,
}

impl ShortcutKind {
    pub const ALL: [ShortcutKind; 2] = [ShortcutKind::StartMenu, ShortcutKind::Desktop];

    /// Manifest identifier of the shortcut
    pub fn id(self) -> &'static str {
        match self {
            ShortcutKind::StartMenu => "StartMenuShortcut",
            ShortcutKind::Desktop => "DesktopShortcut",
        }
    }

    /// Well-known directory the shortcut is placed in
    pub fn target_folder(self) -> &'static str {
        match self {
            ShortcutKind::StartMenu => "ProgramMenuFolder",
            ShortcutKind::Desktop => "DesktopFolder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutDescriptor {
    pub kind: ShortcutKind,
    pub display_name: String,
    pub description: String,
}

/// Decides which files get shortcuts and builds their descriptors
#[derive(Debug, Clone)]
pub struct ShortcutAttacher {
    marker: Option<String>,
    display_name: String,
    description: String,
    matched: usize,
}

impl ShortcutAttacher {
    /// `description` falls back to `manufacturer` when absent.
    pub fn new(
        marker: Option<String>,
        display_name: impl Into<String>,
        description: Option<String>,
        manufacturer: &str,
    ) -> Self {
        Self {
            marker: marker.filter(|m| !m.is_empty()),
            display_name: display_name.into(),
            description: description.unwrap_or_else(|| manufacturer.to_string()),
            matched: 0,
        }
    }

    /// Attacher that never matches
    pub fn disabled() -> Self {
        Self {
            marker: None,
            display_name: String::new(),
            description: String::new(),
            matched: 0,
        }
    }

    /// Whether `source` contains the marker, ending on a path-component boundary
    pub fn matches(&self, source: &Path) -> bool {
        let Some(marker) = self.marker.as_deref() else {
            return false;
        };
        let haystack = source.to_string_lossy();
        // Occurrences may overlap, so every start position is checked.
        haystack
            .char_indices()
            .filter(|(start, _)| haystack[*start..].starts_with(marker))
            .any(
                |(start, _)| match haystack[start + marker.len()..].chars().next() {
                    None => true,
                    Some(next) => next == '/' || next == '\\',
                },
            )
    }

    /// Attach both shortcuts to `entry` if it matches; returns whether it did
    pub fn attach(&mut self, entry: &mut FileEntry) -> bool {
        if !self.matches(&entry.source) {
            return false;
        }

        self.matched += 1;
        if self.matched > 1 {
            warn!(
                path = %entry.source.display(),
                matches = self.matched,
                "Executable marker matched more than one file"
            );
        } else {
            debug!(path = %entry.source.display(), "Attaching shortcuts");
        }

        entry.shortcuts = ShortcutKind::ALL
            .iter()
            .map(|&kind| ShortcutDescriptor {
                kind,
                display_name: self.display_name.clone(),
                description: self.description.clone(),
            })
            .collect();
        true
    }

    /// Number of files that received shortcuts so far
    pub fn matched(&self) -> usize {
        self.matched
    }
}
