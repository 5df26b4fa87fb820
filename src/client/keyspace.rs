//! Key namespace methods.
//!
//! Keys form a hierarchical address space rooted at `/`, browsed one
//! directory at a time. Each key holds a single typed value; directories
//! come into existence with their keys and are erased with them.

use tracing::debug;

use crate::error::Result;
use crate::protocol::{Command, DirListing, KeyValue, KeyspaceCommand, ValueType};

use super::ConsoleClient;

// ============================================================================
// ConsoleClient - Key Namespace
// ============================================================================

impl ConsoleClient {
    /// Lists the entries directly under `dir`.
    pub async fn get_dir_entries(&self, dir: impl Into<String>) -> Result<DirListing> {
        let dir = dir.into();
        debug!(dir = %dir, "Listing directory");

        let response = self
            .send_command(Command::Keyspace(KeyspaceCommand::GetDirEntries { dir }))
            .await?;
        let listing: DirListing = serde_json::from_value(response.into_result()?)?;

        debug!(dir = %listing.dir, count = listing.content.len(), "Got directory entries");
        Ok(listing)
    }

    /// Looks up the typed value stored under `key`.
    pub async fn lookup(&self, key: impl Into<String>) -> Result<KeyValue> {
        let key = key.into();
        debug!(key = %key, "Looking up key");

        let response = self
            .send_command(Command::Keyspace(KeyspaceCommand::Lookup { key }))
            .await?;
        let value: KeyValue = serde_json::from_value(response.into_result()?)?;

        debug!(value_type = %value.value_type, "Lookup complete");
        Ok(value)
    }

    /// Stores a typed value under `key`.
    ///
    /// The value travels as a string rendering (hex digits for
    /// [`ValueType::Blob`]); parsing and range-checking it is the server's
    /// concern, and a value the server cannot interpret rejects the call
    /// with an RPC error.
    pub async fn store(
        &self,
        key: impl Into<String>,
        value_type: ValueType,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, value_type = %value_type, "Storing value");

        self.send_command(Command::Keyspace(KeyspaceCommand::Store {
            key,
            value_type,
            value,
        }))
        .await?
        .into_result()?;
        Ok(())
    }

    /// Erases a single key.
    pub async fn erase_key(&self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        debug!(key = %key, "Erasing key");

        self.send_command(Command::Keyspace(KeyspaceCommand::EraseKey { key }))
            .await?
            .into_result()?;
        Ok(())
    }

    /// Erases a directory and everything below it.
    pub async fn erase_dir_recursive(&self, dir: impl Into<String>) -> Result<()> {
        let dir = dir.into();
        debug!(dir = %dir, "Erasing directory recursively");

        self.send_command(Command::Keyspace(KeyspaceCommand::EraseDirRecursive { dir }))
            .await?
            .into_result()?;
        Ok(())
    }
}
