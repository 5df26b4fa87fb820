//! WebSocket connection and event loop.
//!
//! This module owns the single WebSocket session to the service, including
//! request/response correlation and lifecycle notification.
//!
//! # Event Loop
//!
//! The connection spawns a tokio task that handles:
//!
//! - Inbound frames from the service (responses, correlated by integer id)
//! - Outbound requests from the client API
//! - Lifecycle transitions reported to the registered observer
//!
//! The session is one-shot: once the socket errors or closes, the connection
//! is terminal and is never restarted. What happens to calls still in flight
//! at that point is governed by [`DisconnectPolicy`].

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{from_str, to_string};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::{RequestId, RequestIdCounter};
use crate::protocol::{Command, Request, Response};

use super::Endpoint;

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream type.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of the split WebSocket stream.
type WsSink = SplitSink<WsStream, Message>;

/// Map of request ids to response channels.
///
/// Every id present corresponds to exactly one request sent but not yet
/// settled.
type PendingTable = FxHashMap<RequestId, oneshot::Sender<Result<Response>>>;

// ============================================================================
// ConnectionObserver
// ============================================================================

/// Receiver of connection lifecycle transitions.
///
/// Callbacks are invoked from the connection's event-loop task, decoupled
/// from any specific in-flight call:
///
/// - [`on_connect`](Self::on_connect) once the socket reaches the open state
/// - [`on_error`](Self::on_error) on any socket-level error
/// - [`on_disconnect`](Self::on_disconnect) when the session ends for any
///   reason, including after an error
///
/// Keep implementations non-blocking: the event loop does not process
/// frames while a callback runs.
pub trait ConnectionObserver: Send + Sync {
    /// The socket reached the open state.
    fn on_connect(&self) {}

    /// A socket-level error occurred. [`on_disconnect`](Self::on_disconnect)
    /// follows.
    fn on_error(&self) {}

    /// The session ended.
    fn on_disconnect(&self) {}
}

/// Observer that ignores all transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConnectionObserver for NoopObserver {}

// ============================================================================
// DisconnectPolicy
// ============================================================================

/// What happens to in-flight calls when the session terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Sweep the pending table and reject every entry with
    /// [`Error::ConnectionClosed`].
    #[default]
    RejectAll,

    /// Abandon pending entries; their futures never settle. This reproduces
    /// the browser console's behavior, where a dropped socket leaves every
    /// outstanding call hanging until page reload.
    LeakPending,
}

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of the single WebSocket session.
///
/// Transitions are `Uninit → Open → (Error | Closed)`; the terminal states
/// are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake not yet completed.
    Uninit,
    /// Socket open, calls may be issued.
    Open,
    /// Terminated by a socket-level error.
    Error,
    /// Closed without a socket-level error.
    Closed,
}

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Send a request and settle the channel when its response arrives.
    Send {
        request: Request,
        response_tx: oneshot::Sender<Result<Response>>,
    },
    /// Close the socket and terminate the session.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// A single JSON-RPC session with the service.
///
/// Owns one WebSocket connection and one monotonically-assigned request-id
/// space. The event loop runs in its own task; handles are cheap to clone
/// and share it.
///
/// # Thread Safety
///
/// `Connection` is `Send + Sync`. The pending table is behind a single
/// mutex: it is touched from the event loop (insert on send, remove on
/// receive) and from the terminal sweep only.
#[derive(Clone)]
pub struct Connection {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Pending-request table (shared with event loop).
    pending: Arc<Mutex<PendingTable>>,
    /// Session state (shared with event loop).
    state: Arc<Mutex<ConnectionState>>,
    /// Request-id counter for this session.
    ids: Arc<RequestIdCounter>,
}

impl Connection {
    /// Opens the WebSocket session and spawns the event loop.
    ///
    /// One-shot setup: no retry is attempted. `observer.on_connect()` fires
    /// once the handshake completes, before this returns. If the open fails,
    /// the observer sees `on_error` followed by `on_disconnect`, matching a
    /// failed socket open in the original console.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the socket cannot be established.
    pub async fn connect(
        endpoint: &Endpoint,
        observer: Arc<dyn ConnectionObserver>,
        policy: DisconnectPolicy,
    ) -> Result<Self> {
        let state = Arc::new(Mutex::new(ConnectionState::Uninit));

        debug!(endpoint = %endpoint, "Connecting");
        let ws_stream = match connect_async(endpoint.ws_url()).await {
            Ok((stream, _response)) => stream,
            Err(e) => {
                *state.lock() = ConnectionState::Error;
                observer.on_error();
                observer.on_disconnect();
                return Err(Error::connection(e.to_string()));
            }
        };

        *state.lock() = ConnectionState::Open;
        debug!(endpoint = %endpoint, "WebSocket open");
        observer.on_connect();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let pending = Arc::new(Mutex::new(PendingTable::default()));

        tokio::spawn(Self::run_event_loop(
            ws_stream,
            command_rx,
            Arc::clone(&pending),
            Arc::clone(&state),
            observer,
            policy,
        ));

        Ok(Self {
            command_tx,
            pending,
            state,
            ids: Arc::new(RequestIdCounter::new()),
        })
    }

    /// Sends a command and waits for the correlated response.
    ///
    /// A fresh request id is assigned, the request is framed and sent, and
    /// the returned future settles when the response with the matching id
    /// arrives. There is no internal timeout, retry, or pending-count limit;
    /// callers that want a deadline wrap the future themselves.
    ///
    /// A response carrying an `error` object still resolves the call here;
    /// [`Response::into_result`] converts it into [`Error::Rpc`].
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the session already terminated, or
    ///   terminates while the call is in flight under
    ///   [`DisconnectPolicy::RejectAll`]
    /// - [`Error::Connection`] if the frame cannot be written
    /// - [`Error::Json`] if the request cannot be serialized
    pub async fn call(&self, command: Command) -> Result<Response> {
        let request = Request::new(self.ids.next(), command);
        let (response_tx, response_rx) = oneshot::channel();

        self.command_tx
            .send(ConnectionCommand::Send {
                request,
                response_tx,
            })
            .map_err(|_| Error::ConnectionClosed)?;

        match response_rx.await {
            Ok(result) => result,
            // Sender dropped without settling: the loop terminated between
            // accepting the command and sending the frame.
            Err(_) => Err(Error::ConnectionClosed),
        }
    }

    /// Returns the current session state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Returns the number of calls awaiting a response.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Closes the session.
    ///
    /// The observer sees `on_disconnect` once the event loop winds down;
    /// in-flight calls are handled per the session's [`DisconnectPolicy`].
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Event loop that owns the socket.
    async fn run_event_loop(
        ws_stream: WsStream,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        pending: Arc<Mutex<PendingTable>>,
        state: Arc<Mutex<ConnectionState>>,
        observer: Arc<dyn ConnectionObserver>,
        policy: DisconnectPolicy,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();
        let mut errored = false;

        loop {
            tokio::select! {
                // Inbound frames from the service
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_inbound_frame(&text, &pending);
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            errored = true;
                            observer.on_error();
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Outbound requests from the client API
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Send { request, response_tx }) => {
                            Self::handle_send_command(
                                request,
                                response_tx,
                                &mut ws_write,
                                &pending,
                            ).await;
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            break;
                        }
                    }
                }
            }
        }

        *state.lock() = if errored {
            ConnectionState::Error
        } else {
            ConnectionState::Closed
        };

        Self::sweep_pending(&pending, policy);
        observer.on_disconnect();

        debug!("Event loop terminated");
    }

    /// Handles one inbound text frame.
    ///
    /// Frames that do not parse as a response, and responses whose id has no
    /// pending entry (stray or duplicate), are dropped without touching
    /// transport state.
    fn handle_inbound_frame(text: &str, pending: &Arc<Mutex<PendingTable>>) {
        let response = match from_str::<Response>(text) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Unparseable inbound frame, dropping");
                return;
            }
        };

        let tx = pending.lock().remove(&response.id);

        match tx {
            Some(tx) => {
                trace!(id = %response.id, "Response correlated");
                let _ = tx.send(Ok(response));
            }
            None => {
                debug!(id = %response.id, "Response with no pending request, dropping");
            }
        }
    }

    /// Handles a send command from the client API.
    async fn handle_send_command(
        request: Request,
        response_tx: oneshot::Sender<Result<Response>>,
        ws_write: &mut WsSink,
        pending: &Arc<Mutex<PendingTable>>,
    ) {
        let request_id = request.id;

        let json = match to_string(&request) {
            Ok(json) => json,
            Err(e) => {
                let _ = response_tx.send(Err(Error::Json(e)));
                return;
            }
        };

        // Register the pending entry before the frame leaves, so a fast
        // response cannot miss it.
        pending.lock().insert(request_id, response_tx);

        if let Err(e) = ws_write.send(Message::Text(json.into())).await {
            if let Some(tx) = pending.lock().remove(&request_id) {
                let _ = tx.send(Err(Error::connection(e.to_string())));
            }
            return;
        }

        trace!(id = %request_id, "Request sent");
    }

    /// Sweeps the pending table on session termination.
    fn sweep_pending(pending: &Arc<Mutex<PendingTable>>, policy: DisconnectPolicy) {
        let entries: Vec<_> = pending.lock().drain().collect();
        if entries.is_empty() {
            return;
        }

        let count = entries.len();
        match policy {
            DisconnectPolicy::RejectAll => {
                for (_, tx) in entries {
                    let _ = tx.send(Err(Error::ConnectionClosed));
                }
                debug!(count, "Rejected pending requests on disconnect");
            }
            DisconnectPolicy::LeakPending => {
                warn!(count, "Abandoning pending requests on disconnect");
                for (_, tx) in entries {
                    // Leak the sender so the caller's future never settles.
                    std::mem::forget(tx);
                }
            }
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
