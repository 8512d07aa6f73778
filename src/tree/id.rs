//! Identifier encoding for manifest entries
//!
//! Paths relative to the source root are turned into identifiers by
//! percent-encoding every byte outside the unreserved set and joining the
//! encoded components with [`SEPARATOR_TOKEN`]. Because `%` itself is always
//! encoded, the mapping is injective and [`decode`] restores the exact path.
//!
//! An entry whose encoding would spell one of the [`RESERVED_IDS`] gets its
//! first byte escaped as well, so it can never share a key with the install
//! chain or the shortcut folders.

use crate::error::TreeError;
use crate::types::EntryId;
use std::path::{Component, Path, PathBuf};

/// Fixed escape sequence standing in for a path separator
pub const SEPARATOR_TOKEN: &str = "%2F";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Well-known directory ids emitted alongside the tree
pub const RESERVED_IDS: [&str; 7] = [
    "INSTALLDIR",
    "TARGETDIR",
    "ProgramFilesFolder",
    "ProgramFiles64Folder",
    "LocalAppDataFolder",
    "ProgramMenuFolder",
    "DesktopFolder",
];

/// Encode `path` (absolute, under `root`) into a manifest identifier
pub fn encode(root: &Path, path: &Path) -> Result<EntryId, TreeError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        TreeError::InvalidPath(format!(
            "{:?} is not under source root {:?}",
            path, root
        ))
    })?;
    encode_relative(relative)
}

/// Encode a path that is already relative to the source root
pub fn encode_relative(relative: &Path) -> Result<EntryId, TreeError> {
    let mut encoded = String::with_capacity(relative.as_os_str().len());

    for component in relative.components() {
        let name = match component {
            Component::Normal(name) => name.to_str().ok_or_else(|| {
                TreeError::InvalidPath(format!("{:?} is not valid UTF-8", relative))
            })?,
            Component::CurDir => continue,
            Component::RootDir | Component::Prefix(_) => {
                return Err(TreeError::InvalidPath(format!(
                    "{:?} is not a relative path",
                    relative
                )))
            }
            Component::ParentDir => {
                return Err(TreeError::InvalidPath(format!(
                    "{:?} escapes the source root",
                    relative
                )))
            }
        };

        if !encoded.is_empty() {
            encoded.push_str(SEPARATOR_TOKEN);
        }
        percent_encode_into(name, &mut encoded);
    }

    if encoded.is_empty() {
        return Err(TreeError::InvalidPath(
            "empty relative path has no identifier".to_string(),
        ));
    }

    if RESERVED_IDS.contains(&encoded.as_str()) {
        // Reserved ids are plain ASCII, so the first char is one byte.
        let first = encoded.remove(0) as u8;
        encoded.insert(0, HEX_DIGITS[(first & 0x0f) as usize] as char);
        encoded.insert(0, HEX_DIGITS[(first >> 4) as usize] as char);
        encoded.insert(0, '%');
    }

    Ok(EntryId::from_encoded(encoded))
}

/// Decode an identifier back into the relative path it was produced from
pub fn decode(id: &str) -> Result<PathBuf, TreeError> {
    let mut path = PathBuf::new();
    for segment in id.split(SEPARATOR_TOKEN) {
        if segment.is_empty() {
            return Err(TreeError::InvalidPath(format!(
                "identifier {:?} contains an empty path component",
                id
            )));
        }
        path.push(percent_decode(segment)?);
    }
    Ok(path)
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn percent_encode_into(name: &str, out: &mut String) {
    for &byte in name.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
        }
    }
}

fn percent_decode(segment: &str) -> Result<String, TreeError> {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%' {
            let (hi, lo) = match (bytes.get(index + 1), bytes.get(index + 2)) {
                (Some(&hi), Some(&lo)) => (hex_value(hi), hex_value(lo)),
                _ => {
                    return Err(TreeError::InvalidPath(format!(
                        "truncated escape in identifier segment {:?}",
                        segment
                    )))
                }
            };
            match (hi, lo) {
                (Some(hi), Some(lo)) => decoded.push((hi << 4) | lo),
                _ => {
                    return Err(TreeError::InvalidPath(format!(
                        "invalid escape in identifier segment {:?}",
                        segment
                    )))
                }
            }
            index += 3;
            continue;
        }

        decoded.push(bytes[index]);
        index += 1;
    }

    let name = String::from_utf8(decoded).map_err(|_| {
        TreeError::InvalidPath(format!(
            "identifier segment {:?} is not valid UTF-8 after decoding",
            segment
        ))
    })?;

    // A separator is only ever produced by the token, never by an escape.
    if name.contains('/') {
        return Err(TreeError::InvalidPath(format!(
            "identifier segment {:?} decodes to a path separator",
            segment
        )));
    }

    Ok(name)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
