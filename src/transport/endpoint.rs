//! Service endpoint derivation.
//!
//! The service exposes its JSON-RPC channel on the fixed path `/json_ws` of
//! the console's own host. An `http` console URL maps to `ws`, `https` to
//! `wss`; a `ws`/`wss` URL is taken as the channel address verbatim.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Fixed path of the JSON-RPC WebSocket channel on the service host.
pub const JSON_WS_PATH: &str = "/json_ws";

// ============================================================================
// Endpoint
// ============================================================================

/// Resolved WebSocket address of one PHKVStorage service.
///
/// # Example
///
/// ```
/// use phkvs_console::Endpoint;
///
/// let endpoint = Endpoint::from_console_url("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(endpoint.ws_url(), "ws://127.0.0.1:8080/json_ws");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Fully resolved `ws`/`wss` URL.
    url: Url,
}

impl Endpoint {
    /// Derives the endpoint from a console page URL.
    ///
    /// The scheme is upgraded to its WebSocket equivalent (`http` → `ws`,
    /// `https` → `wss`; `ws`/`wss` pass through) and the path is replaced
    /// with [`JSON_WS_PATH`]. Query and fragment are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not parse or uses an
    /// unsupported scheme.
    pub fn from_console_url(console_url: &str) -> Result<Self> {
        let mut url = Url::parse(console_url)
            .map_err(|e| Error::config(format!("invalid console URL '{console_url}': {e}")))?;

        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => {
                return Err(Error::config(format!(
                    "unsupported console URL scheme '{other}'"
                )));
            }
        };

        url.set_scheme(scheme)
            .map_err(|()| Error::config(format!("cannot map '{console_url}' to a WebSocket URL")))?;
        url.set_path(JSON_WS_PATH);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self { url })
    }

    /// Uses a `ws`/`wss` URL as the channel address verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not parse or is not a
    /// WebSocket URL.
    pub fn from_ws_url(ws_url: &str) -> Result<Self> {
        let url = Url::parse(ws_url)
            .map_err(|e| Error::config(format!("invalid WebSocket URL '{ws_url}': {e}")))?;

        match url.scheme() {
            "ws" | "wss" => Ok(Self { url }),
            other => Err(Error::config(format!(
                "expected a ws:// or wss:// URL, got scheme '{other}'"
            ))),
        }
    }

    /// Returns the resolved WebSocket URL.
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns `true` if the channel uses TLS (`wss`).
    #[inline]
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_maps_to_ws() {
        let endpoint = Endpoint::from_console_url("http://example.com:8080/").expect("derive");
        assert_eq!(endpoint.ws_url(), "ws://example.com:8080/json_ws");
        assert!(!endpoint.is_secure());
    }

    #[test]
    fn test_https_maps_to_wss() {
        let endpoint = Endpoint::from_console_url("https://example.com/").expect("derive");
        assert_eq!(endpoint.ws_url(), "wss://example.com/json_ws");
        assert!(endpoint.is_secure());
    }

    #[test]
    fn test_path_query_fragment_replaced() {
        let endpoint = Endpoint::from_console_url("http://host/console/index.html?tab=volumes#top")
            .expect("derive");
        assert_eq!(endpoint.ws_url(), "ws://host/json_ws");
    }

    #[test]
    fn test_ws_console_url_keeps_scheme() {
        let endpoint = Endpoint::from_console_url("ws://host:9000/anything").expect("derive");
        assert_eq!(endpoint.ws_url(), "ws://host:9000/json_ws");
    }

    #[test]
    fn test_from_ws_url_verbatim() {
        let endpoint = Endpoint::from_ws_url("ws://127.0.0.1:4444/json_ws").expect("accept");
        assert_eq!(endpoint.ws_url(), "ws://127.0.0.1:4444/json_ws");
    }

    #[test]
    fn test_from_ws_url_rejects_http() {
        let result = Endpoint::from_ws_url("http://127.0.0.1:4444/json_ws");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = Endpoint::from_console_url("ftp://example.com/");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_url() {
        let result = Endpoint::from_console_url("not a url");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
