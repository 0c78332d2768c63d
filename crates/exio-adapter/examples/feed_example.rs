/*
[INPUT]:  Feed URL and optional credentials
[OUTPUT]: Real-time market updates counted and printed
[POS]:    Examples - WebSocket feed handling
[UPDATE]: When the feed API changes
*/

use async_trait::async_trait;
use exio_adapter::{ExioWebSocket, FeedConfig, FeedHandler, FeedMessage};
use std::sync::Arc;

/// Count every classified message and print book updates
#[derive(Debug, Default)]
struct CountingHandler {
    message_count: u64,
}

#[async_trait]
impl FeedHandler for CountingHandler {
    async fn on_open(&mut self) {
        println!("-- Subscribed! --");
    }

    async fn on_update(&mut self, msg: &FeedMessage) {
        self.message_count += 1;
        println!("{}", serde_json::to_string_pretty(msg).expect("serialize message"));
    }

    async fn on_close(&mut self) {
        println!("-- Socket Closed --");
    }
}

/// Example: stream book updates for two pairs until Ctrl-C
#[tokio::main]
async fn main() {
    let config = FeedConfig {
        symbols: Some(vec!["btc-usdt", "eth-btc"].into()),
        ..FeedConfig::default()
    };

    let client = Arc::new(ExioWebSocket::new(config));
    let canceller = client.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.close();
        }
    });

    let mut handler = CountingHandler::default();
    if let Err(err) = client.start(&mut handler).await {
        eprintln!("connect failed: {err}");
        std::process::exit(1);
    }

    println!("message count = {}", handler.message_count);
    if let Some(err) = client.take_last_error() {
        eprintln!("session ended with error: {err}");
        std::process::exit(1);
    }
}
