//! Loopback servers shared by the integration tests.
//!
//! `HttpStub` answers canned JSON per request target; `FeedStub` accepts
//! WebSocket connections, sends a scripted list of frames, then holds the
//! connection open until the client closes it, optionally repeating one
//! frame on an interval.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

use coincap_rates::prelude::*;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub const BITCOIN: &str = r#"{"id":"bitcoin","rank":"1","symbol":"BTC","name":"Bitcoin","supply":"19500000","priceUsd":"50000.00","changePercent24Hr":"1.25","marketCapUsd":"975000000000.00"}"#;
pub const ETHEREUM: &str = r#"{"id":"ethereum","rank":"2","symbol":"ETH","name":"Ethereum","supply":"120000000","priceUsd":"3000.00","changePercent24Hr":null,"marketCapUsd":null}"#;

pub fn assets_body() -> String {
    format!(r#"{{"data":[{BITCOIN},{ETHEREUM}],"timestamp":1700000000000}}"#)
}

pub fn asset_body(asset: &str) -> String {
    format!(r#"{{"data":{asset},"timestamp":1700000000000}}"#)
}

pub fn history_body(points: &[(&str, i64)]) -> String {
    let data: Vec<String> = points
        .iter()
        .map(|(price, time)| format!(r#"{{"priceUsd":"{price}","time":{time},"date":""}}"#))
        .collect();
    format!(r#"{{"data":[{}],"timestamp":1700000000000}}"#, data.join(","))
}

// ─── HTTP stub ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

pub struct HttpStub {
    addr: std::net::SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl HttpStub {
    /// Serve `routes`, keyed by request target (`/v2/assets/bitcoin`).
    /// Unknown targets answer 404.
    pub async fn start(routes: Vec<(&str, Canned)>) -> Self {
        let routes: Arc<HashMap<String, Canned>> = Arc::new(
            routes
                .into_iter()
                .map(|(target, canned)| (target.to_string(), canned))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(serve_http(stream, routes, log));
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v2/assets", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for HttpStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn ok(body: String) -> Canned {
    Canned {
        status: 200,
        body,
        delay: Duration::ZERO,
    }
}

pub fn status(status: u16, body: &str) -> Canned {
    Canned {
        status,
        body: body.to_string(),
        delay: Duration::ZERO,
    }
}

async fn serve_http(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, Canned>>,
    log: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(target.clone());

    let canned = routes
        .get(&target)
        .cloned()
        .unwrap_or_else(|| status(404, r#"{"error":"not found"}"#));
    tokio::time::sleep(canned.delay).await;

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        canned.body.len(),
        canned.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

// ─── WebSocket stub ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FeedStats {
    pub connections: AtomicUsize,
    /// Ticks sent by a ticking stub.
    pub ticks: AtomicUsize,
    /// Close frames received from clients.
    pub client_closes: AtomicUsize,
    pub last_close_code: Mutex<Option<u16>>,
    pub pongs: AtomicUsize,
    pub uris: Mutex<Vec<String>>,
}

pub struct FeedStub {
    addr: std::net::SocketAddr,
    pub stats: Arc<FeedStats>,
    handle: JoinHandle<()>,
}

impl FeedStub {
    /// Every connection receives `script` in order, then waits for the
    /// client. With `close_after`, the server closes with code 1000 instead.
    pub async fn start(script: Vec<Message>, close_after: bool) -> Self {
        Self::spawn(script, close_after, None).await
    }

    /// Sends `tick` every `every` until the client closes.
    pub async fn ticking(tick: Message, every: Duration) -> Self {
        Self::spawn(Vec::new(), false, Some((tick, every))).await
    }

    async fn spawn(script: Vec<Message>, close_after: bool, tick: Option<(Message, Duration)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(FeedStats::default());

        let shared = Arc::clone(&stats);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(serve_ws(
                    stream,
                    script.clone(),
                    close_after,
                    tick.clone(),
                    Arc::clone(&shared),
                ));
            }
        });

        Self {
            addr,
            stats,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/prices", self.addr)
    }

    pub fn connections(&self) -> usize {
        self.stats.connections.load(Ordering::SeqCst)
    }

    pub fn client_closes(&self) -> usize {
        self.stats.client_closes.load(Ordering::SeqCst)
    }

    pub fn ticks(&self) -> usize {
        self.stats.ticks.load(Ordering::SeqCst)
    }
}

impl Drop for FeedStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn text(s: &str) -> Message {
    Message::Text(s.to_string().into())
}

async fn serve_ws(
    stream: TcpStream,
    script: Vec<Message>,
    close_after: bool,
    tick: Option<(Message, Duration)>,
    stats: Arc<FeedStats>,
) {
    let uri_stats = Arc::clone(&stats);
    let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        uri_stats.uris.lock().unwrap().push(req.uri().to_string());
        Ok(resp)
    };
    let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
        return;
    };
    stats.connections.fetch_add(1, Ordering::SeqCst);

    for msg in script {
        if ws.send(msg).await.is_err() {
            return;
        }
    }

    if close_after {
        let _ = ws.close(None).await;
    }

    let (mut sink, mut stream) = ws.split();
    let mut ticker = tick.map(|(msg, every)| (msg, tokio::time::interval(every)));
    loop {
        let next_tick = async {
            match ticker.as_mut() {
                Some((msg, interval)) => {
                    interval.tick().await;
                    msg.clone()
                }
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            msg = next_tick => {
                if sink.send(msg).await.is_err() {
                    break;
                }
                stats.ticks.fetch_add(1, Ordering::SeqCst);
            }
            msg = stream.next() => match msg {
                Some(Ok(Message::Close(frame))) => {
                    stats.client_closes.fetch_add(1, Ordering::SeqCst);
                    *stats.last_close_code.lock().unwrap() = frame.map(|f| f.code.into());
                    break;
                }
                Some(Ok(Message::Pong(_))) => {
                    stats.pongs.fetch_add(1, Ordering::SeqCst);
                }
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

pub fn client_for(http: &HttpStub, feed: &FeedStub) -> RatesClient {
    RatesClient::builder()
        .base_url(&http.base_url())
        .ws_url(&feed.url())
        .build()
        .expect("client should build")
}

/// Poll `check` until it returns true or the test timeout elapses.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

/// Render `frame` until it contains `needle`; returns the matching frame.
pub async fn wait_for_frame<F, Fut>(mut frame: F, needle: &str) -> String
where
    F: FnMut() -> Fut,
    Fut: Future<Output = String>,
{
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    loop {
        let text = frame().await;
        if text.contains(needle) {
            return text;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "never rendered {needle:?}; last frame:\n{text}"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
