/*
[INPUT]:  Raw feed frames parsed as JSON
[OUTPUT]: Typed feed messages classified into Book/Order/Misc categories
[POS]:    WebSocket layer - message parsing and classification
[UPDATE]: When adding new message types or changing format
*/

use serde::{Deserialize, Serialize};

/// Message types reflecting order-book state changes
pub const BOOK_MSG_TYPES: [&str; 4] = ["bookOrders", "add", "remove", "trade"];

/// Message types reflecting the lifecycle of the user's own orders
pub const ORDER_MSG_TYPES: [&str; 5] =
    ["openOrders", "accepted", "rejected", "canceled", "executed"];

/// Liveness messages with no trading content
pub const MISC_MSG_TYPES: [&str; 1] = ["heartbeat"];

/// Category a classified feed message routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCategory {
    Book,
    Order,
    Misc,
}

/// Classify a message type into its category; `None` marks an unrecognized
/// type, which the dispatcher reports as a fault rather than dropping
pub fn classify(kind: &str) -> Option<FeedCategory> {
    if BOOK_MSG_TYPES.contains(&kind) {
        Some(FeedCategory::Book)
    } else if ORDER_MSG_TYPES.contains(&kind) {
        Some(FeedCategory::Order)
    } else if MISC_MSG_TYPES.contains(&kind) {
        Some(FeedCategory::Misc)
    } else {
        None
    }
}

/// One inbound feed message: the `type` tag plus whatever payload fields the
/// type carries. Only the tag is validated; the payload stays schemaless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl FeedMessage {
    pub fn category(&self) -> Option<FeedCategory> {
        classify(&self.kind)
    }
}
