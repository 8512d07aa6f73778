//! Component registration GUIDs and upgrade codes

use crate::types::EntryId;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Produces the registration GUID the linker records for each component
pub trait GuidGenerator {
    fn component_guid(&self, id: &EntryId) -> Uuid;
}

/// Fresh random (v4) GUID on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuids;

impl GuidGenerator for RandomGuids {
    fn component_guid(&self, _id: &EntryId) -> Uuid {
        Uuid::new_v4()
    }
}

/// GUIDs derived from a namespace and the component identifier
///
/// GUID = first 16 bytes of hash("component" || namespace || id_len || id),
/// stamped with the RFC 4122 version and variant bits. The same namespace and
/// identifier always yield the same GUID, so rebuilding an unchanged tree keeps
/// component registrations stable.
#[derive(Debug, Clone, Copy)]
pub struct StableGuids {
    namespace: Uuid,
}

impl StableGuids {
    pub fn new(namespace: Uuid) -> Self {
        Self { namespace }
    }
}

impl GuidGenerator for StableGuids {
    fn component_guid(&self, id: &EntryId) -> Uuid {
        let id_bytes = id.as_str().as_bytes();

        let mut hasher = Hasher::new();
        hasher.update(b"component");
        hasher.update(self.namespace.as_bytes());
        hasher.update(&(id_bytes.len() as u64).to_be_bytes());
        hasher.update(id_bytes);

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hasher.finalize().as_bytes()[..16]);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Which generator a build uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidMode {
    #[default]
    Random,
    Stable,
}

impl GuidMode {
    pub fn generator(self, upgrade_code: Uuid) -> Box<dyn GuidGenerator> {
        match self {
            GuidMode::Random => Box::new(RandomGuids),
            GuidMode::Stable => Box::new(StableGuids::new(upgrade_code)),
        }
    }
}

impl std::str::FromStr for GuidMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(GuidMode::Random),
            "stable" => Ok(GuidMode::Stable),
            other => Err(format!(
                "Invalid GUID mode: {} (must be 'random' or 'stable')",
                other
            )),
        }
    }
}

/// Upgrade code used when none is configured: UUIDv3 of the product name in the DNS namespace
pub fn default_upgrade_code(product_name: &str) -> Uuid {
    Uuid::new_v3(&Uuid::NAMESPACE_DNS, product_name.as_bytes())
}

/// Format a GUID the way WiX writes them: uppercase, hyphenated, no braces
pub fn format_guid(guid: &Uuid) -> String {
    guid.hyphenated().to_string().to_uppercase()
}
