//! JSON-RPC 2.0 Request and Response message types.
//!
//! Defines the message framing between the console client and the
//! PHKVStorage service. Every frame carries a whole request or response.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::RequestId;

use super::Command;

// ============================================================================
// Constants
// ============================================================================

/// Protocol version member sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// Error Codes
// ============================================================================

/// JSON-RPC error codes used by the service.
///
/// The range starting at [`error_codes::SERVER_ERROR`] is reserved for
/// service-specific failures.
pub mod error_codes {
    /// Invalid JSON was received by the server.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
    /// Start of the implementation-defined server error range.
    pub const SERVER_ERROR: i64 = -32000;
}

// ============================================================================
// Request
// ============================================================================

/// A JSON-RPC request from client to server.
///
/// # Format
///
/// ```json
/// {
///   "jsonrpc": "2.0",
///   "id": 1,
///   "method": "get_volumes_list",
///   "params": {}
/// }
/// ```
///
/// The id is an integer: the server rejects any other id shape.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: &'static str,

    /// Unique identifier for request/response correlation.
    pub id: RequestId,

    /// Command with method and params.
    #[serde(flatten)]
    pub command: Command,
}

impl Request {
    /// Creates a new request with the given correlation id.
    #[inline]
    #[must_use]
    pub fn new(id: RequestId, command: Command) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            command,
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// A JSON-RPC response from server to client.
///
/// # Format
///
/// Success:
/// ```json
/// { "jsonrpc": "2.0", "id": 1, "result": [] }
/// ```
///
/// Error:
/// ```json
/// { "jsonrpc": "2.0", "id": 1,
///   "error": { "code": -32000, "message": "out of range" } }
/// ```
///
/// Frames that do not parse into this shape (including error frames the
/// server emits without an id when the request itself was unreadable) are
/// dropped by the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Matches the request `id`.
    pub id: RequestId,

    /// Result payload (if success).
    #[serde(default)]
    pub result: Option<Value>,

    /// Error payload (if error).
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl Response {
    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Extracts the result value, converting a server error payload into
    /// [`Error::Rpc`].
    ///
    /// A success response without a `result` member yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rpc`] if the response carried an `error` object.
    pub fn into_result(self) -> Result<Value> {
        if let Some(error) = self.error {
            return Err(error.into());
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

// ============================================================================
// RpcError
// ============================================================================

/// The `error` member of a JSON-RPC error response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    /// Numeric error code (see [`error_codes`]).
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional structured payload.
    #[serde(default)]
    pub data: Option<Value>,
}

impl From<RpcError> for Error {
    fn from(error: RpcError) -> Self {
        Error::rpc(error.code, error.message, error.data)
    }
}

// ============================================================================
// Tests
// ============================================================================
