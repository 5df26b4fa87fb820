//! Typed payloads exchanged with the service.
//!
//! These mirror the JSON shapes the server produces and consumes; member
//! names stay in the server's `camelCase`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identifiers::VolumeId;

// ============================================================================
// VolumeInfo
// ============================================================================

/// One row of the mounted-volumes listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    /// Directory the volume files live in (server-side path).
    #[serde(rename = "volumePath")]
    pub volume_path: String,

    /// Base name of the volume files.
    #[serde(rename = "volumeName")]
    pub volume_name: String,

    /// Key-namespace path the volume is mounted at.
    #[serde(rename = "mountPointPath")]
    pub mount_point_path: String,

    /// Handle used to unmount the volume.
    #[serde(rename = "volumeId")]
    pub volume_id: VolumeId,
}

// ============================================================================
// Directory Entries
// ============================================================================

/// Discriminates directory entries from key entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirEntryKind {
    /// A subdirectory.
    Dir,
    /// A key holding a value.
    Key,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: DirEntryKind,

    /// Entry name relative to the listed directory.
    pub name: String,

    /// Rendered value for key entries, absent for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl DirEntry {
    /// Returns `true` if this entry is a subdirectory.
    #[inline]
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Dir
    }
}

/// Result of a `get_dir_entries` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirListing {
    /// The directory that was listed.
    pub dir: String,

    /// Entries directly under `dir`.
    pub content: Vec<DirEntry>,
}

// ============================================================================
// KeyValue
// ============================================================================

/// A typed value as returned by `lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Value type tag.
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Value rendered as a string (hex digits for `blob`).
    pub value: String,
}

// ============================================================================
// ValueType
// ============================================================================

/// Wire vocabulary of storable value types.
///
/// The tag travels verbatim in `store` requests and `lookup` responses.
/// Interpreting or validating the accompanying value string is the server's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Binary blob, rendered as hex digits.
    Blob,
}

impl ValueType {
    /// All value types, in the order the console presents them.
    pub const ALL: [ValueType; 8] = [
        ValueType::Uint8,
        ValueType::Uint16,
        ValueType::Uint32,
        ValueType::Uint64,
        ValueType::Float,
        ValueType::Double,
        ValueType::String,
        ValueType::Blob,
    ];

    /// Returns the wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Blob => "blob",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint8" => Ok(Self::Uint8),
            "uint16" => Ok(Self::Uint16),
            "uint32" => Ok(Self::Uint32),
            "uint64" => Ok(Self::Uint64),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "string" => Ok(Self::String),
            "blob" => Ok(Self::Blob),
            other => Err(Error::invalid_argument(format!(
                "unknown value type '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_info_parse() {
        let json_str = r#"{
            "volumePath": "/data/volumes",
            "volumeName": "main",
            "mountPointPath": "/",
            "volumeId": 1
        }"#;

        let info: VolumeInfo = serde_json::from_str(json_str).expect("parse");
        assert_eq!(info.volume_name, "main");
        assert_eq!(info.volume_id, VolumeId::new(1));
    }

    #[test]
    fn test_dir_entry_without_value() {
        let json_str = r#"{"type":"dir","name":"sub"}"#;

        let entry: DirEntry = serde_json::from_str(json_str).expect("parse");
        assert!(entry.is_dir());
        assert_eq!(entry.name, "sub");
        assert_eq!(entry.value, None);
    }

    #[test]
    fn test_dir_listing_parse() {
        let json_str = r#"{
            "dir": "/",
            "content": [
                {"type": "dir", "name": "config"},
                {"type": "key", "name": "counter", "value": "7"}
            ]
        }"#;

        let listing: DirListing = serde_json::from_str(json_str).expect("parse");
        assert_eq!(listing.dir, "/");
        assert_eq!(listing.content.len(), 2);
        assert!(listing.content[0].is_dir());
        assert_eq!(listing.content[1].kind, DirEntryKind::Key);
        assert_eq!(listing.content[1].value.as_deref(), Some("7"));
    }

    #[test]
    fn test_value_type_wire_names() {
        for vt in ValueType::ALL {
            let json = serde_json::to_string(&vt).expect("serialize");
            assert_eq!(json, format!("\"{}\"", vt.as_str()));
        }
    }

    #[test]
    fn test_value_type_from_str() {
        assert_eq!("uint64".parse::<ValueType>().expect("parse"), ValueType::Uint64);
        assert_eq!("blob".parse::<ValueType>().expect("parse"), ValueType::Blob);
        assert!("int8".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_key_value_parse() {
        let json_str = r#"{"type":"string","value":"hello"}"#;

        let kv: KeyValue = serde_json::from_str(json_str).expect("parse");
        assert_eq!(kv.value_type, ValueType::String);
        assert_eq!(kv.value, "hello");
    }
}
