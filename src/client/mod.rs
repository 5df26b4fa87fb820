//! Typed operator API over one service session.
//!
//! [`ConsoleClient`] wraps the transport connection with the operations the
//! admin console exposes, one method per remote procedure.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | ConsoleClient struct and accessors |
//! | `builder` | Connection configuration |
//! | `volumes` | Volume create/mount/unmount/list |
//! | `keyspace` | Directory browsing, lookup, store, erase |
//!
//! # Example
//!
//! ```ignore
//! let client = ConsoleClient::builder()
//!     .console_url("http://127.0.0.1:8080/")
//!     .connect()
//!     .await?;
//!
//! for volume in client.get_volumes_list().await? {
//!     println!("{} at {}", volume.volume_name, volume.mount_point_path);
//! }
//!
//! client.store("/config/retries", ValueType::Uint8, "3").await?;
//! let value = client.lookup("/config/retries").await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod builder;
mod core;
mod keyspace;
mod volumes;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use core::ConsoleClient;
