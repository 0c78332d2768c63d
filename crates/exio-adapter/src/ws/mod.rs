/*
[INPUT]:  Feed configuration and subscription channels
[OUTPUT]: Real-time market and order updates dispatched to handlers
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod handler;
pub mod message;
pub mod subscribe;

pub use client::{DEFAULT_FEED_URL, ExioWebSocket, FeedConfig};
pub use handler::{FeedHandler, LogHandler};
pub use message::{
    BOOK_MSG_TYPES, FeedCategory, FeedMessage, MISC_MSG_TYPES, ORDER_MSG_TYPES, classify,
};
pub use subscribe::build_subscribe_request;
