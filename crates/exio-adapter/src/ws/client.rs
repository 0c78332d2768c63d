/*
[INPUT]:  Feed URL, subscription configuration and a handler implementation
[OUTPUT]: A live subscription session dispatching messages to the handler
[POS]:    WebSocket layer - connection lifecycle management
[UPDATE]: When changing connection logic, keepalive or fault handling
*/

use crate::auth::{ApiCredentials, CredentialSigner, HmacSigner};
use crate::http::{ExioError, Result};
use crate::types::{Channel, Symbols};
use crate::ws::handler::FeedHandler;
use crate::ws::message::FeedMessage;
use crate::ws::subscribe::build_subscribe_request;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{self, Bytes, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, warn};

/// Default feed endpoint
pub const DEFAULT_FEED_URL: &str = "wss://feed.sandbox.ex.io";

/// Interval between keepalive pings on an idle connection
const DEFAULT_KEEPALIVE: Duration = Duration::from_secs(30);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Feed session configuration, fixed at client construction
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub symbols: Option<Symbols>,
    pub channels: Option<Vec<Channel>>,
    pub credentials: Option<ApiCredentials>,
    pub keepalive: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            symbols: None,
            channels: None,
            credentials: None,
            keepalive: DEFAULT_KEEPALIVE,
        }
    }
}

/// Streaming feed client for the EXIO exchange.
///
/// One instance drives one subscription session: [`start`](Self::start) runs
/// connect, listen and disconnect in sequence on the calling task and returns
/// once the session ends. There is no automatic reconnect; the intended use
/// is a fresh instance per connection attempt, with the caller inspecting
/// [`take_last_error`](Self::take_last_error) to decide whether to retry.
///
/// [`close`](Self::close) may be called from any task while `start` is
/// running; it only sets the stop flag, and the receive loop observes it
/// within one keepalive interval.
pub struct ExioWebSocket {
    config: FeedConfig,
    signer: Arc<dyn CredentialSigner>,
    stop: Arc<AtomicBool>,
    last_error: Mutex<Option<ExioError>>,
}

impl ExioWebSocket {
    /// Create a feed client with the default HMAC credential signer
    pub fn new(config: FeedConfig) -> Self {
        Self::with_signer(config, Arc::new(HmacSigner))
    }

    /// Create a feed client with a custom credential signer
    pub fn with_signer(config: FeedConfig, signer: Arc<dyn CredentialSigner>) -> Self {
        Self {
            config,
            signer,
            stop: Arc::new(AtomicBool::new(false)),
            last_error: Mutex::new(None),
        }
    }

    /// Request cancellation of a running session. Safe to call from any task
    /// at any time; only the stop flag is written.
    pub fn close(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether the stop flag has been set (by `close` or by a stream fault)
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Take the error that terminated the last session, if any
    pub fn take_last_error(&self) -> Option<ExioError> {
        self.last_error
            .lock()
            .map(|mut slot| slot.take())
            .unwrap_or(None)
    }

    /// Run one subscription session: `on_open`, connect, listen until the
    /// stop flag is set or a fault occurs, then disconnect and `on_close`.
    ///
    /// Only a connect failure is returned as `Err`; in-session faults are
    /// routed through `on_error` and recorded for `take_last_error`.
    pub async fn start<H: FeedHandler>(&self, handler: &mut H) -> Result<()> {
        self.stop.store(false, Ordering::SeqCst);
        handler.on_open().await;

        let mut stream = self.connect().await?;
        self.listen(&mut stream, handler).await;
        self.disconnect(stream, handler).await;

        Ok(())
    }

    /// Open the socket and send the subscribe frame
    async fn connect(&self) -> Result<WsStream> {
        let request = build_subscribe_request(
            self.config.symbols.clone(),
            self.config.channels.clone(),
            self.config.credentials.as_ref(),
            self.signer.as_ref(),
        )?;
        let frame = serde_json::to_string(&request)?;

        let url = self.config.url.trim_end_matches('/');
        let (mut stream, response) = connect_async(url).await.map_err(ExioError::Connect)?;
        info!(url, status = ?response.status(), "feed connected");

        stream
            .send(Message::Text(frame.into()))
            .await
            .map_err(ExioError::Connect)?;
        debug!(channels = request.channels.len(), "subscribe frame sent");

        Ok(stream)
    }

    /// Receive loop: keepalive pings bracket a deadline-bounded receive so
    /// the stop flag is re-checked at least once per keepalive interval even
    /// when the peer is silent
    async fn listen<H: FeedHandler>(&self, stream: &mut WsStream, handler: &mut H) {
        let mut last_ping = Instant::now();

        while !self.stop.load(Ordering::SeqCst) {
            if last_ping.elapsed() >= self.config.keepalive {
                if let Err(err) = stream.send(Message::Ping(Bytes::from_static(b"keepalive"))).await
                {
                    self.fault(handler, ExioError::Transport(err), None).await;
                    continue;
                }
                debug!("keepalive ping sent");
                last_ping = Instant::now();
            }

            let deadline = self.config.keepalive.saturating_sub(last_ping.elapsed());
            let frame = match timeout(deadline, stream.next()).await {
                // receive deadline reached: re-check stop flag and keepalive
                Err(_) => continue,
                Ok(None) => {
                    let err = ExioError::Transport(tungstenite::Error::ConnectionClosed);
                    self.fault(handler, err, None).await;
                    continue;
                }
                Ok(Some(Err(err))) => {
                    self.fault(handler, ExioError::Transport(err), None).await;
                    continue;
                }
                Ok(Some(Ok(frame))) => frame,
            };

            match frame {
                Message::Text(text) => self.dispatch(handler, text.as_str()).await,
                Message::Binary(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    self.dispatch(handler, &text).await;
                }
                Message::Ping(payload) => {
                    let _ = stream.send(Message::Pong(payload)).await;
                }
                Message::Pong(_) => {}
                Message::Close(close_frame) => {
                    warn!(frame = ?close_frame, "close frame received");
                    let err = ExioError::Transport(tungstenite::Error::ConnectionClosed);
                    self.fault(handler, err, None).await;
                }
                Message::Frame(_) => {}
            }
        }
    }

    /// Parse one frame and route it: known category to the update hook,
    /// unknown type or parse failure through the fault path
    async fn dispatch<H: FeedHandler>(&self, handler: &mut H, raw: &str) {
        let msg: FeedMessage = match serde_json::from_str(raw) {
            Ok(msg) => msg,
            Err(err) => {
                self.fault(handler, ExioError::Serialization(err), Some(raw))
                    .await;
                return;
            }
        };

        match msg.category() {
            Some(_) => handler.on_update(&msg).await,
            None => {
                let err = ExioError::UnrecognizedMessage {
                    kind: msg.kind.clone(),
                    raw: raw.to_string(),
                };
                self.fault(handler, err, Some(raw)).await;
            }
        }
    }

    /// Single fault path for in-session errors: mark the session terminal,
    /// notify the handler, record the error. Never panics and never
    /// propagates.
    async fn fault<H: FeedHandler>(&self, handler: &mut H, error: ExioError, raw: Option<&str>) {
        self.stop.store(true, Ordering::SeqCst);
        error!(error = %error, "feed fault, stopping session");
        handler.on_error(&error, raw).await;
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = Some(error);
        }
    }

    /// Close the socket (an already-closed socket is a no-op) and fire
    /// `on_close` exactly once
    async fn disconnect<H: FeedHandler>(&self, mut stream: WsStream, handler: &mut H) {
        match stream.close(None).await {
            Ok(())
            | Err(tungstenite::Error::ConnectionClosed)
            | Err(tungstenite::Error::AlreadyClosed) => {}
            Err(err) => warn!(error = %err, "error closing feed socket"),
        }
        debug!("feed disconnected");
        handler.on_close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.url, DEFAULT_FEED_URL);
        assert_eq!(config.keepalive, Duration::from_secs(30));
        assert!(config.symbols.is_none());
        assert!(config.channels.is_none());
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_close_sets_stop_flag_only() {
        let client = ExioWebSocket::new(FeedConfig::default());
        assert!(!client.is_stopped());

        client.close();
        assert!(client.is_stopped());
        assert!(client.take_last_error().is_none());
    }

    #[test]
    fn test_take_last_error_drains_slot() {
        let client = ExioWebSocket::new(FeedConfig::default());
        if let Ok(mut slot) = client.last_error.lock() {
            *slot = Some(ExioError::Config("boom".to_string()));
        }

        assert!(client.take_last_error().is_some());
        assert!(client.take_last_error().is_none());
    }
}
