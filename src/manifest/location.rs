//! Install location: the directory chain the component tree is mounted under

use crate::tree::INSTALL_DIR_ID;
use crate::types::Architecture;
use serde::Serialize;

/// Outermost directory of every install chain
pub const TARGET_DIR_ID: &str = "TARGETDIR";
const TARGET_DIR_NAME: &str = "SourceDir";

/// Well-known folder the install directory lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgramsFolder {
    /// Per-user application data
    LocalAppData,
    /// 64-bit program files
    ProgramFiles64,
    /// 32-bit program files
    ProgramFiles,
}

impl ProgramsFolder {
    /// Select the folder for an install scope and architecture
    ///
    /// Architecture is irrelevant for local installs.
    pub fn select(local: bool, arch: Architecture) -> Self {
        match (local, arch) {
            (true, _) => ProgramsFolder::LocalAppData,
            (false, Architecture::X64) => ProgramsFolder::ProgramFiles64,
            (false, Architecture::X86) => ProgramsFolder::ProgramFiles,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ProgramsFolder::LocalAppData => "LocalAppDataFolder",
            ProgramsFolder::ProgramFiles64 => "ProgramFiles64Folder",
            ProgramsFolder::ProgramFiles => "ProgramFilesFolder",
        }
    }
}

/// Whether the package installs for the current user or the whole machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstallScope {
    PerUser,
    PerMachine,
}

impl InstallScope {
    pub fn from_local(local: bool) -> Self {
        if local {
            InstallScope::PerUser
        } else {
            InstallScope::PerMachine
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InstallScope::PerUser => "perUser",
            InstallScope::PerMachine => "perMachine",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryLink {
    pub id: String,
    pub name: Option<String>,
}

/// Nested directories from `TARGETDIR` down to `INSTALLDIR`, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryChain {
    links: Vec<DirectoryLink>,
}

impl DirectoryChain {
    /// Chain for the given scope, architecture and root-install override
    pub fn resolve(local: bool, arch: Architecture, root_install: bool, install_dir: &str) -> Self {
        let chain = Self::under_programs_folder(ProgramsFolder::select(local, arch), install_dir);
        if root_install {
            chain.install_at_root()
        } else {
            chain
        }
    }

    /// `TARGETDIR → <folder> → INSTALLDIR`
    pub fn under_programs_folder(folder: ProgramsFolder, install_dir: &str) -> Self {
        Self {
            links: vec![
                DirectoryLink {
                    id: TARGET_DIR_ID.to_string(),
                    name: Some(TARGET_DIR_NAME.to_string()),
                },
                DirectoryLink {
                    id: folder.id().to_string(),
                    name: None,
                },
                DirectoryLink {
                    id: INSTALL_DIR_ID.to_string(),
                    name: Some(install_dir.to_string()),
                },
            ],
        }
    }

    /// Re-parent the innermost link directly under the drive root
    pub fn install_at_root(mut self) -> Self {
        if self.links.len() > 2 {
            let innermost = self.links.pop();
            self.links.truncate(1);
            self.links.extend(innermost);
        }
        self
    }

    pub fn links(&self) -> &[DirectoryLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The directory holding the component tree
    pub fn innermost(&self) -> Option<&DirectoryLink> {
        self.links.last()
    }

    /// Link ids, outermost first
    pub fn ids(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.id.as_str()).collect()
    }
}
