//! Core value types shared across the tree and manifest modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Manifest identifier of a file, component, or directory
///
/// Values are produced by [`crate::tree::id::encode`] (or are one of the fixed
/// well-known directory identifiers) and never contain a literal path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an already-encoded identifier
    pub(crate) fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// Well-known identifier, e.g. `INSTALLDIR`
    pub fn well_known(id: &'static str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Target architecture of the produced package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    #[default]
    X86,
    X64,
}

impl Architecture {
    /// Value passed to the linker's `-a` flag
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "x64" | "amd64" | "x86_64" => Ok(Architecture::X64),
            other => Err(format!(
                "Unknown architecture '{}' (expected 'x86' or 'x64')",
                other
            )),
        }
    }
}
