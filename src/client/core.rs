//! Core ConsoleClient struct and accessors.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::protocol::{Command, Response};
use crate::transport::{Connection, ConnectionState, Endpoint};

use super::ClientBuilder;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a client.
pub(crate) struct ClientInner {
    /// The single JSON-RPC session.
    pub connection: Connection,
    /// Resolved service endpoint.
    pub endpoint: Endpoint,
}

// ============================================================================
// ConsoleClient
// ============================================================================

/// A handle to one PHKVStorage service session.
///
/// Provides the typed operator API: volume management and key-namespace
/// operations. Handles are cheap to clone and share one connection.
#[derive(Clone)]
pub struct ConsoleClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl fmt::Debug for ConsoleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleClient")
            .field("endpoint", &self.inner.endpoint)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ConsoleClient {
    /// Returns a builder for connecting a new client.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client handle over an established connection.
    pub(crate) fn new(connection: Connection, endpoint: Endpoint) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                connection,
                endpoint,
            }),
        }
    }
}

// ============================================================================
// ConsoleClient - Accessors
// ============================================================================

impl ConsoleClient {
    /// Returns the resolved service endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// Returns the current session state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.inner.connection.state()
    }

    /// Returns the number of calls awaiting a response.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.connection.pending_count()
    }

    /// Closes the session.
    ///
    /// All clones of this handle become unusable; subsequent calls fail
    /// with a connection error.
    pub fn close(&self) {
        self.inner.connection.shutdown();
    }
}

// ============================================================================
// ConsoleClient - Internal
// ============================================================================

impl ConsoleClient {
    /// Sends a command and returns the correlated response.
    pub(crate) async fn send_command(&self, command: Command) -> Result<Response> {
        self.inner.connection.call(command).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ConsoleClient;

    #[test]
    fn test_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ConsoleClient>();
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConsoleClient>();
    }
}
