/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for exio-adapter tests

use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{WebSocketStream, accept_async};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// In-process WebSocket feed endpoint for driving the streaming client
#[allow(dead_code)]
pub struct FeedServer {
    listener: TcpListener,
    pub url: String,
}

#[allow(dead_code)]
impl FeedServer {
    /// Bind to an ephemeral local port
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind feed server");
        let addr = listener.local_addr().expect("local addr");
        Self {
            listener,
            url: format!("ws://{addr}"),
        }
    }

    /// Accept a single client connection and complete the handshake
    pub async fn accept(self) -> WebSocketStream<TcpStream> {
        let (stream, _) = self.listener.accept().await.expect("accept connection");
        accept_async(stream).await.expect("websocket handshake")
    }
}
