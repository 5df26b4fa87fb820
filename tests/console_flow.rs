//! End-to-end console flows against an in-process mock service.
//!
//! Each test stands up a one-connection WebSocket server that plays the
//! PHKVStorage JSON-RPC dispatcher, then drives the real client against it.

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::time::timeout;
use tokio_test::assert_ok;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use phkvs_console::{
    ConnectionObserver, ConnectionState, ConsoleClient, DisconnectPolicy, Error, ValueType,
};

// ============================================================================
// Mock Service
// ============================================================================

type ServiceSocket = WebSocketStream<TcpStream>;

/// Binds a localhost server that accepts one WebSocket connection and hands
/// it to `handler`.
async fn spawn_service<F, Fut>(handler: F) -> Result<SocketAddr>
where
    F: FnOnce(ServiceSocket) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await
            && let Ok(socket) = tokio_tungstenite::accept_async(stream).await
        {
            handler(socket).await;
        }
    });

    Ok(addr)
}

async fn connect_client(addr: SocketAddr) -> Result<ConsoleClient> {
    let client = ConsoleClient::builder()
        .ws_url(format!("ws://{addr}/json_ws"))
        .connect()
        .await?;
    Ok(client)
}

/// Reads the next text frame and parses it as a request object.
async fn next_request(socket: &mut ServiceSocket) -> Value {
    loop {
        let message = socket
            .next()
            .await
            .expect("connection open")
            .expect("frame readable");
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("request is JSON");
        }
    }
}

async fn send_json(socket: &mut ServiceSocket, value: Value) {
    socket
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("response sent");
}

// ============================================================================
// Observer Recording
// ============================================================================

#[derive(Default)]
struct RecordingObserver {
    connects: AtomicUsize,
    errors: AtomicUsize,
    disconnects: AtomicUsize,
    disconnected: Notify,
}

impl ConnectionObserver for RecordingObserver {
    fn on_connect(&self) {
        self.connects.fetch_add(1, Ordering::SeqCst);
    }

    fn on_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    fn on_disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.disconnected.notify_one();
    }
}

// ============================================================================
// Tests - Correlation
// ============================================================================

#[tokio::test]
async fn get_volumes_list_round_trip() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let request = next_request(&mut socket).await;

        // The exact frame the service expects from the console.
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["method"], "get_volumes_list");
        assert_eq!(request["params"], json!({}));
        assert!(request["id"].is_u64(), "id must be an integer");
        assert_eq!(request["id"], 1, "first id of a fresh session");

        send_json(
            &mut socket,
            json!({"jsonrpc": "2.0", "id": request["id"], "result": []}),
        )
        .await;
    })
    .await?;

    let client = connect_client(addr).await?;
    let volumes = assert_ok!(client.get_volumes_list().await);

    assert!(volumes.is_empty());
    assert_eq!(client.pending_count(), 0);
    Ok(())
}

#[tokio::test]
async fn lookup_value_round_trips_unchanged() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let request = next_request(&mut socket).await;
        assert_eq!(request["method"], "lookup");
        assert_eq!(request["params"]["key"], "/config/motd");

        send_json(
            &mut socket,
            json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "result": {"type": "string", "value": "hello, operator"}
            }),
        )
        .await;
    })
    .await?;

    let client = connect_client(addr).await?;
    let value = client.lookup("/config/motd").await?;

    assert_eq!(value.value_type, ValueType::String);
    assert_eq!(value.value, "hello, operator");
    Ok(())
}

#[tokio::test]
async fn concurrent_calls_settle_by_id_not_arrival_order() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let first = next_request(&mut socket).await;
        let second = next_request(&mut socket).await;

        // Answer out of order; each response still names its own id and
        // echoes its own key, so any swap would be visible to the client.
        for request in [second, first] {
            let key = request["params"]["key"].as_str().expect("key").to_string();
            send_json(
                &mut socket,
                json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "result": {"type": "string", "value": format!("value of {key}")}
                }),
            )
            .await;
        }
    })
    .await?;

    let client = connect_client(addr).await?;
    let (a, b) = tokio::join!(client.lookup("/a"), client.lookup("/b"));

    assert_eq!(a?.value, "value of /a");
    assert_eq!(b?.value, "value of /b");
    assert_eq!(client.pending_count(), 0);
    Ok(())
}

#[tokio::test]
async fn stray_and_malformed_frames_are_ignored() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let request = next_request(&mut socket).await;

        // A response nobody asked for, then a frame that is not JSON-RPC
        // at all; neither may disturb the outstanding call.
        send_json(&mut socket, json!({"jsonrpc": "2.0", "id": 9999, "result": {}})).await;
        socket
            .send(Message::Text("not even json".into()))
            .await
            .expect("frame sent");

        send_json(
            &mut socket,
            json!({
                "jsonrpc": "2.0",
                "id": request["id"],
                "result": {"dir": "/", "content": []}
            }),
        )
        .await;
    })
    .await?;

    let client = connect_client(addr).await?;
    let listing = client.get_dir_entries("/").await?;

    assert_eq!(listing.dir, "/");
    assert!(listing.content.is_empty());
    assert_eq!(client.pending_count(), 0);
    Ok(())
}

// ============================================================================
// Tests - Error Responses
// ============================================================================

#[tokio::test]
async fn store_error_rejects_only_that_call() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let store = next_request(&mut socket).await;
        assert_eq!(store["method"], "store");
        assert_eq!(store["params"]["type"], "uint8");

        send_json(
            &mut socket,
            json!({
                "jsonrpc": "2.0",
                "id": store["id"],
                "error": {"code": -32000, "message": "out of range"}
            }),
        )
        .await;

        // The session survives the error response.
        let lookup = next_request(&mut socket).await;
        send_json(
            &mut socket,
            json!({
                "jsonrpc": "2.0",
                "id": lookup["id"],
                "result": {"type": "uint8", "value": "7"}
            }),
        )
        .await;
    })
    .await?;

    let client = connect_client(addr).await?;

    let err = client
        .store("/k", ValueType::Uint8, "999")
        .await
        .expect_err("server rejected the store");
    assert_eq!(err.rpc_code(), Some(-32000));
    assert_eq!(err.to_string(), "RPC error -32000: out of range");

    let value = client.lookup("/k").await?;
    assert_eq!(value.value, "7");
    Ok(())
}

// ============================================================================
// Tests - Lifecycle
// ============================================================================

#[tokio::test]
async fn connect_and_shutdown_lifecycle() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        // Wait for the client's close frame.
        while let Some(Ok(message)) = socket.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    })
    .await?;

    let observer = Arc::new(RecordingObserver::default());
    let client = ConsoleClient::builder()
        .ws_url(format!("ws://{addr}/json_ws"))
        .observer(Arc::clone(&observer) as Arc<dyn ConnectionObserver>)
        .connect()
        .await?;

    assert_eq!(observer.connects.load(Ordering::SeqCst), 1);
    assert_eq!(client.state(), ConnectionState::Open);

    client.close();
    timeout(Duration::from_secs(5), observer.disconnected.notified()).await?;

    assert_eq!(observer.disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(observer.errors.load(Ordering::SeqCst), 0);
    assert_eq!(client.state(), ConnectionState::Closed);
    Ok(())
}

#[tokio::test]
async fn disconnect_rejects_pending_calls_under_reject_all() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        // Swallow the request, then end the session without answering.
        let _ = next_request(&mut socket).await;
        socket.close(None).await.expect("close sent");
    })
    .await?;

    let observer = Arc::new(RecordingObserver::default());
    let client = ConsoleClient::builder()
        .ws_url(format!("ws://{addr}/json_ws"))
        .observer(Arc::clone(&observer) as Arc<dyn ConnectionObserver>)
        .disconnect_policy(DisconnectPolicy::RejectAll)
        .connect()
        .await?;

    let err = client
        .lookup("/orphaned")
        .await
        .expect_err("swept on disconnect");
    assert!(matches!(err, Error::ConnectionClosed));

    timeout(Duration::from_secs(5), observer.disconnected.notified()).await?;
    assert_eq!(observer.disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(client.pending_count(), 0);

    // The session is terminal: later calls fail fast.
    let err = client.lookup("/again").await.expect_err("session over");
    assert!(err.is_connection_error());
    Ok(())
}

#[tokio::test]
async fn disconnect_leaves_pending_calls_unsettled_under_leak_pending() -> Result<()> {
    let addr = spawn_service(|mut socket| async move {
        let _ = next_request(&mut socket).await;
        socket.close(None).await.expect("close sent");
    })
    .await?;

    let observer = Arc::new(RecordingObserver::default());
    let client = ConsoleClient::builder()
        .ws_url(format!("ws://{addr}/json_ws"))
        .observer(Arc::clone(&observer) as Arc<dyn ConnectionObserver>)
        .disconnect_policy(DisconnectPolicy::LeakPending)
        .connect()
        .await?;

    let call_client = client.clone();
    let call = tokio::spawn(async move { call_client.lookup("/orphaned").await });

    // The observer learns about the disconnect...
    timeout(Duration::from_secs(5), observer.disconnected.notified()).await?;
    assert_eq!(observer.disconnects.load(Ordering::SeqCst), 1);

    // ...but the abandoned call never settles.
    let settled = timeout(Duration::from_millis(300), call).await;
    assert!(settled.is_err(), "abandoned call must not settle");
    Ok(())
}
