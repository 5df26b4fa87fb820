//! JSON-RPC protocol message types.
//!
//! This module defines the wire format between the console client and the
//! PHKVStorage service: JSON-RPC 2.0 request/response objects framed as
//! whole-message text frames over a single WebSocket.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`Request`] | Client → Server | Method call with correlation id |
//! | [`Response`] | Server → Client | Result or error for one id |
//!
//! There are no server-push messages: every inbound frame is a response to
//! an outstanding request, and frames with unknown ids are dropped.
//!
//! # Method Naming
//!
//! Methods use `snake_case` names; parameter members use `camelCase`:
//!
//! - `get_volumes_list`, `mount_volume`, `unmount_volume`
//! - `get_dir_entries`, `lookup`, `store`, `erase_key`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by domain |
//! | `request` | Request and Response framing |
//! | `types` | Typed payloads (volumes, entries, values) |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by service domain.
pub mod command;

/// JSON-RPC request and response message types.
pub mod request;

/// Typed payloads exchanged with the service.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Command, KeyspaceCommand, VolumeCommand};
pub use request::{error_codes, JSONRPC_VERSION, Request, Response, RpcError};
pub use types::{DirEntry, DirEntryKind, DirListing, KeyValue, ValueType, VolumeInfo};
