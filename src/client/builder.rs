//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and connecting a
//! [`ConsoleClient`].
//!
//! # Example
//!
//! ```no_run
//! use phkvs_console::ConsoleClient;
//!
//! # async fn example() -> phkvs_console::Result<()> {
//! let client = ConsoleClient::builder()
//!     .console_url("http://127.0.0.1:8080/")
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::transport::{Connection, ConnectionObserver, DisconnectPolicy, Endpoint, NoopObserver};

use super::core::ConsoleClient;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`ConsoleClient`].
///
/// Use [`ConsoleClient::builder()`] to create a new builder. Exactly one of
/// [`console_url`](Self::console_url) or [`ws_url`](Self::ws_url) must be
/// set.
#[derive(Default)]
pub struct ClientBuilder {
    /// Console page URL to derive the endpoint from.
    console_url: Option<String>,
    /// WebSocket URL to use verbatim.
    ws_url: Option<String>,
    /// Lifecycle observer.
    observer: Option<Arc<dyn ConnectionObserver>>,
    /// In-flight call handling on disconnect.
    disconnect_policy: DisconnectPolicy,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("console_url", &self.console_url)
            .field("ws_url", &self.ws_url)
            .field("observer", &self.observer.is_some())
            .field("disconnect_policy", &self.disconnect_policy)
            .finish()
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new client builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the console page URL; the WebSocket endpoint is derived from it
    /// (`http` → `ws`, `https` → `wss`, path replaced with `/json_ws`).
    #[inline]
    #[must_use]
    pub fn console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = Some(url.into());
        self
    }

    /// Sets the WebSocket URL verbatim (`ws://` or `wss://`).
    #[inline]
    #[must_use]
    pub fn ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = Some(url.into());
        self
    }

    /// Registers a lifecycle observer.
    ///
    /// Without one, transitions are only logged.
    #[inline]
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn ConnectionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the in-flight call handling on disconnect.
    ///
    /// Defaults to [`DisconnectPolicy::RejectAll`].
    #[inline]
    #[must_use]
    pub fn disconnect_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.disconnect_policy = policy;
        self
    }

    /// Connects to the service and returns an operable client.
    ///
    /// The handshake completes before this returns, so calls on the
    /// returned client are never issued against a half-open socket.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no URL, or both URLs, were set
    /// - [`Error::Config`] if the URL cannot be resolved to an endpoint
    /// - [`Error::Connection`] if the socket cannot be established
    pub async fn connect(self) -> Result<ConsoleClient> {
        let endpoint = match (&self.console_url, &self.ws_url) {
            (Some(console_url), None) => Endpoint::from_console_url(console_url)?,
            (None, Some(ws_url)) => Endpoint::from_ws_url(ws_url)?,
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "console_url and ws_url are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(Error::config("no service URL configured"));
            }
        };

        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(NoopObserver) as Arc<dyn ConnectionObserver>);

        let connection = Connection::connect(&endpoint, observer, self.disconnect_policy).await?;

        Ok(ConsoleClient::new(connection, endpoint))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_a_url() {
        let result = ClientBuilder::new().connect().await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_connect_rejects_both_urls() {
        let result = ClientBuilder::new()
            .console_url("http://127.0.0.1:8080/")
            .ws_url("ws://127.0.0.1:8080/json_ws")
            .connect()
            .await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_connect_propagates_bad_scheme() {
        let result = ClientBuilder::new()
            .console_url("ftp://127.0.0.1/")
            .connect()
            .await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_builder_debug_omits_observer_details() {
        let builder = ClientBuilder::new().console_url("http://h/");
        let debug = format!("{builder:?}");
        assert!(debug.contains("console_url"));
        assert!(debug.contains("observer: false"));
    }
}
