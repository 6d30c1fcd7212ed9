//! Native price feed: `tokio-tungstenite`.
//!
//! - Background tokio task owns the connection
//! - Protocol-level ping answered with pong
//! - Inbound frames decoded into `FeedEvent`s and delivered over a bounded channel
//! - No reconnect: the task ends when the connection does

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::StreamError;
use crate::ws::{decode_message, FeedConfig, FeedEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Disconnect,
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: FeedConfig,
    event_tx: mpsc::Sender<FeedEvent>,
    cmd_rx: mpsc::Receiver<Command>,
    connected: Arc<AtomicBool>,
}

impl TaskState {
    /// Deliver an event, waiting for channel capacity. A consumer that went
    /// away is not an error.
    async fn emit(&self, event: FeedEvent) {
        let _ = self.event_tx.send(event).await;
    }
}

// ─── Public PriceFeed ────────────────────────────────────────────────────────

/// Streaming price feed over a single WebSocket connection.
///
/// Uses a background tokio task for the connection. The owner takes the
/// event receiver once with [`PriceFeed::take_events`].
pub struct PriceFeed {
    config: FeedConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    /// Moved into the background task on connect, so the consumer's channel
    /// closes when the task ends.
    event_tx: Option<mpsc::Sender<FeedEvent>>,
    event_rx: Option<mpsc::Receiver<FeedEvent>>,
    task_handle: Option<JoinHandle<()>>,
    connected: Arc<AtomicBool>,
}

impl PriceFeed {
    /// Create a new feed. Does not connect yet.
    pub fn new(config: FeedConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer.max(1));
        Self {
            config,
            cmd_tx: None,
            event_tx: Some(event_tx),
            event_rx: Some(event_rx),
            task_handle: None,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Spawn the background task that opens the connection.
    ///
    /// Returns immediately; the outcome arrives as `FeedEvent::Connected` or
    /// `FeedEvent::StreamError`. Calling it on a started feed is a no-op; a
    /// feed that was disconnected cannot be started again.
    pub async fn connect(&mut self) -> Result<(), StreamError> {
        if self.cmd_tx.is_some() {
            return Ok(());
        }
        let Some(event_tx) = self.event_tx.take() else {
            return Err(StreamError::Closed {
                code: None,
                reason: "Feed already used".into(),
            });
        };

        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        self.cmd_tx = Some(cmd_tx);

        let state = TaskState {
            config: self.config.clone(),
            event_tx,
            cmd_rx,
            connected: Arc::clone(&self.connected),
        };

        self.task_handle = Some(tokio::spawn(run_task(state)));
        Ok(())
    }

    /// Close the connection.
    ///
    /// Sends a normal close frame through the background task and waits for
    /// it to finish, up to `close_timeout_ms`; a task still running after
    /// that is aborted.
    pub async fn disconnect(&mut self) -> Result<(), StreamError> {
        let Some(tx) = self.cmd_tx.take() else {
            return Err(StreamError::NotConnected);
        };
        let _ = tx.try_send(Command::Disconnect);

        if let Some(mut handle) = self.task_handle.take() {
            let wait = Duration::from_millis(self.config.close_timeout_ms);
            if tokio::time::timeout(wait, &mut handle).await.is_err() {
                tracing::warn!("Price feed did not close in time, aborting");
                handle.abort();
            }
        }

        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Take the event receiver. Only the first call returns `Some`.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<FeedEvent>> {
        self.event_rx.take()
    }

    /// Whether the connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Whether `connect()` has been called and `disconnect()` has not.
    pub fn is_started(&self) -> bool {
        self.cmd_tx.is_some()
    }
}

impl Drop for PriceFeed {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    let url = state.config.endpoint();
    let timeout = Duration::from_millis(state.config.connect_timeout_ms);

    let (sink, stream) = match attempt_connect(&url, timeout).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Price feed connection failed: {}", e);
            state.emit(FeedEvent::StreamError(e)).await;
            return;
        }
    };

    state.connected.store(true, Ordering::SeqCst);
    tracing::info!("Price feed connected to {}", url);
    state.emit(FeedEvent::Connected).await;

    run_connected(&mut state, sink, stream).await;

    state.connected.store(false, Ordering::SeqCst);
    tracing::info!("Price feed closed");
}

/// The connected loop: runs until either side closes the connection.
async fn run_connected(
    state: &mut TaskState,
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
) {
    loop {
        tokio::select! {
            // ── a) Incoming WS message ───────────────────────────────────
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let text_str: &str = text.as_ref();
                        for event in decode_message(text_str) {
                            if let FeedEvent::ParseError(e) = &event {
                                tracing::warn!("Price feed parse error: {}", e);
                            }
                            state.emit(event).await;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        tracing::info!("Price feed closed by server: {} {}", code, reason);
                        state.emit(FeedEvent::Disconnected {
                            code: Some(code),
                            reason,
                        }).await;
                        return;
                    }
                    Some(Ok(_)) => {} // Binary, Pong, Frame: ignore
                    Some(Err(e)) => {
                        let reason = e.to_string();
                        tracing::warn!("Price feed error: {}", reason);
                        state.emit(FeedEvent::StreamError(StreamError::Protocol(reason.clone()))).await;
                        state.emit(FeedEvent::Disconnected { code: None, reason }).await;
                        return;
                    }
                    None => {
                        state.emit(FeedEvent::Disconnected {
                            code: None,
                            reason: "Stream ended".into(),
                        }).await;
                        return;
                    }
                }
            }

            // ── b) Command from public API ───────────────────────────────
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Disconnect) => {
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "Client disconnect".into(),
                        }))).await;
                        let _ = state.event_tx.try_send(FeedEvent::Disconnected {
                            code: Some(1000),
                            reason: "Client disconnect".into(),
                        });
                        return;
                    }
                    None => {
                        // PriceFeed dropped: clean exit
                        return;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Establish a WebSocket connection within `timeout`.
async fn attempt_connect(
    url: &str,
    timeout: Duration,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), StreamError> {
    let (ws_stream, _) = tokio::time::timeout(timeout, connect_async(url))
        .await
        .map_err(|_| StreamError::ConnectionFailed("Connection timeout".into()))?
        .map_err(|e| StreamError::ConnectionFailed(e.to_string()))?;

    Ok(ws_stream.split())
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1005, "No close frame".into()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
