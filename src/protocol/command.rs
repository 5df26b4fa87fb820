//! Command definitions organized by service domain.
//!
//! Method names and parameter keys match the server's JSON-RPC registry
//! exactly (`snake_case` methods, `camelCase` parameter members).
//!
//! # Command Domains
//!
//! | Domain | Commands |
//! |--------|----------|
//! | volumes | List, create, mount, unmount storage volumes |
//! | keyspace | Browse directories, lookup, store, erase keys |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::identifiers::VolumeId;

use super::types::ValueType;

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by domain.
///
/// This enum wraps domain-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Volume management commands.
    Volume(VolumeCommand),
    /// Key namespace commands.
    Keyspace(KeyspaceCommand),
}

impl Command {
    /// Returns the wire method name of this command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Volume(cmd) => cmd.method(),
            Self::Keyspace(cmd) => cmd.method(),
        }
    }
}

// ============================================================================
// Volume Commands
// ============================================================================

/// Volume management commands.
///
/// A volume is a server-side storage unit addressed by its on-disk path and
/// name, attached to the key namespace at a mount point path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum VolumeCommand {
    /// List currently mounted volumes.
    #[serde(rename = "get_volumes_list")]
    GetVolumesList {},

    /// Create a new volume and mount it.
    #[serde(rename = "create_and_mount_volume")]
    CreateAndMountVolume {
        /// Directory the volume files live in (server-side path).
        #[serde(rename = "volumePath")]
        volume_path: String,
        /// Base name of the volume files.
        #[serde(rename = "volumeName")]
        volume_name: String,
        /// Key-namespace path the volume is mounted at.
        #[serde(rename = "mountPointPath")]
        mount_point_path: String,
    },

    /// Mount an existing volume.
    #[serde(rename = "mount_volume")]
    MountVolume {
        /// Directory the volume files live in (server-side path).
        #[serde(rename = "volumePath")]
        volume_path: String,
        /// Base name of the volume files.
        #[serde(rename = "volumeName")]
        volume_name: String,
        /// Key-namespace path the volume is mounted at.
        #[serde(rename = "mountPointPath")]
        mount_point_path: String,
    },

    /// Unmount a mounted volume.
    #[serde(rename = "unmount_volume")]
    UnmountVolume {
        /// Handle returned by create/mount.
        #[serde(rename = "volumeId")]
        volume_id: VolumeId,
    },
}

impl VolumeCommand {
    /// Returns the wire method name of this command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetVolumesList {} => "get_volumes_list",
            Self::CreateAndMountVolume { .. } => "create_and_mount_volume",
            Self::MountVolume { .. } => "mount_volume",
            Self::UnmountVolume { .. } => "unmount_volume",
        }
    }
}

// ============================================================================
// Keyspace Commands
// ============================================================================

/// Key namespace commands.
///
/// Keys form a hierarchical address space browsed directory-by-directory;
/// each key holds one typed value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum KeyspaceCommand {
    /// List the entries of one directory.
    #[serde(rename = "get_dir_entries")]
    GetDirEntries {
        /// Directory path to list.
        dir: String,
    },

    /// Look up a single key.
    #[serde(rename = "lookup")]
    Lookup {
        /// Full key path.
        key: String,
    },

    /// Store a typed value under a key.
    #[serde(rename = "store")]
    Store {
        /// Full key path.
        key: String,
        /// Value type tag.
        #[serde(rename = "type")]
        value_type: ValueType,
        /// Value rendered as a string (hex digits for `blob`).
        value: String,
    },

    /// Erase a single key.
    #[serde(rename = "erase_key")]
    EraseKey {
        /// Full key path.
        key: String,
    },

    /// Erase a directory and everything below it.
    #[serde(rename = "erase_dir_recursive")]
    EraseDirRecursive {
        /// Directory path to erase.
        dir: String,
    },
}

impl KeyspaceCommand {
    /// Returns the wire method name of this command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetDirEntries { .. } => "get_dir_entries",
            Self::Lookup { .. } => "lookup",
            Self::Store { .. } => "store",
            Self::EraseKey { .. } => "erase_key",
            Self::EraseDirRecursive { .. } => "erase_dir_recursive",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
