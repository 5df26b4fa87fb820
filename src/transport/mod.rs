//! WebSocket transport layer.
//!
//! This module owns the single JSON-RPC session between the console client
//! and the PHKVStorage service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐                              ┌─────────────────┐
//! │  Client (Rust)   │                              │  Service        │
//! │                  │         WebSocket            │                 │
//! │  Endpoint        │◄────────────────────────────►│  /json_ws       │
//! │  → Connection    │     ws[s]://host/json_ws     │  JSON-RPC       │
//! │                  │                              │  dispatcher     │
//! └──────────────────┘                              └─────────────────┘
//! ```
//!
//! # Session Lifecycle
//!
//! 1. [`Endpoint::from_console_url`] - derive the channel address
//! 2. [`Connection::connect`] - open the socket, `on_connect` fires
//! 3. [`Connection::call`] - issue requests, correlated by integer id
//! 4. Socket error/close - `on_error`/`on_disconnect` fire; in-flight calls
//!    settle per [`DisconnectPolicy`]; the session is terminal
//!
//! There is no reconnect: a dropped socket ends the session, exactly as a
//! dropped socket ends the browser console's session.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `endpoint` | Service endpoint derivation |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// Service endpoint derivation.
pub mod endpoint;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{
    Connection, ConnectionObserver, ConnectionState, DisconnectPolicy, NoopObserver,
};
pub use endpoint::{Endpoint, JSON_WS_PATH};
