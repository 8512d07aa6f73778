//! The assembled manifest document

use crate::error::PackageError;
use crate::manifest::location::{DirectoryChain, InstallScope};
use crate::manifest::wix;
use crate::tree::ComponentTree;
use crate::types::{Architecture, EntryId};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

/// Product-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: String,
    pub version: String,
    pub manufacturer: String,
    pub description: Option<String>,
    pub upgrade_code: Uuid,
    pub arch: Architecture,
    pub scope: InstallScope,
    pub icon: Option<PathBuf>,
}

/// Everything the linker needs, ready to serialize
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    pub product: ProductInfo,
    pub directories: DirectoryChain,
    pub tree: ComponentTree,
    /// Registration GUID per component id
    pub component_guids: HashMap<EntryId, Uuid>,
}

impl ManifestDocument {
    /// Component ids referenced by the feature, in tree order
    pub fn feature_refs(&self) -> &[EntryId] {
        &self.tree.component_ids
    }

    pub fn component_guid(&self, id: &EntryId) -> Option<Uuid> {
        self.component_guids.get(id).copied()
    }

    /// Serialize to WiX XML
    pub fn to_xml(&self) -> String {
        wix::render(self)
    }

    /// Write the document to a new temporary `.wxs` file in `dir`
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn write_temp(&self, dir: &Path) -> Result<NamedTempFile, PackageError> {
        let xml = self.to_xml();
        let mut file = tempfile::Builder::new()
            .prefix("winpkg-")
            .suffix(".wxs")
            .tempfile_in(dir)?;
        file.write_all(xml.as_bytes())?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = xml.len(), "Wrote temporary manifest");
        Ok(file)
    }

    /// Write the document to `path`, replacing it atomically
    ///
    /// The XML is written to a temporary file next to `path` first, so a failed
    /// write never leaves a truncated manifest behind.
    pub fn write_to(&self, path: &Path) -> Result<(), PackageError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = self.write_temp(dir)?;
        file.persist(path).map_err(|e| PackageError::Io(e.error))?;
        debug!(path = %path.display(), "Persisted manifest");
        Ok(())
    }
}
