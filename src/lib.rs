//! PHKVStorage console client - typed admin API over JSON-RPC/WebSocket.
//!
//! This library talks to a PHKVStorage key-value service the same way its
//! browser admin console does: JSON-RPC 2.0 request/response objects framed
//! as text messages over a single WebSocket session.
//!
//! # Architecture
//!
//! The crate is a thin, strictly layered client:
//!
//! - **Transport**: one WebSocket session, one monotonic request-id space,
//!   a pending-request table correlating responses to calls, lifecycle
//!   callbacks to a registered [`ConnectionObserver`]
//! - **Protocol**: the request/response framing and the typed payloads the
//!   service produces and consumes
//! - **Client**: one async method per remote procedure
//!
//! Key design principles:
//!
//! - Each [`ConsoleClient`] owns exactly one connection; sessions are
//!   one-shot and never reconnect
//! - All correlation state lives in the client object, nothing global
//! - Calls have no internal timeout or retry; in-flight calls at disconnect
//!   settle per [`DisconnectPolicy`]
//!
//! # Quick Start
//!
//! ```no_run
//! use phkvs_console::{ConsoleClient, Result, ValueType};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Derive the WebSocket endpoint from the console URL
//!     let client = ConsoleClient::builder()
//!         .console_url("http://127.0.0.1:8080/")
//!         .connect()
//!         .await?;
//!
//!     // Mount a volume and store a value under it
//!     let volume_id = client.create_and_mount_volume(".", "main", "/").await?;
//!     client.store("/greeting", ValueType::String, "hello").await?;
//!
//!     let value = client.lookup("/greeting").await?;
//!     println!("{}: {}", value.value_type, value.value);
//!
//!     client.unmount_volume(volume_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Typed operator API: [`ConsoleClient`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | JSON-RPC message types |
//! | [`transport`] | WebSocket session and correlation (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Typed operator API over one service session.
///
/// Use [`ConsoleClient::builder()`] to configure and connect a client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for protocol entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// JSON-RPC protocol message types.
///
/// Request/response framing and the typed service payloads.
pub mod protocol;

/// WebSocket transport layer.
///
/// Connection lifecycle and request/response correlation.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{ClientBuilder, ConsoleClient};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{RequestId, VolumeId};

// Protocol types
pub use protocol::{
    Command, DirEntry, DirEntryKind, DirListing, KeyValue, KeyspaceCommand, Request, Response,
    RpcError, ValueType, VolumeCommand, VolumeInfo,
};

// Transport types
pub use transport::{
    Connection, ConnectionObserver, ConnectionState, DisconnectPolicy, Endpoint, NoopObserver,
};
