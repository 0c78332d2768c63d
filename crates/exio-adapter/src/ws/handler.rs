/*
[INPUT]:  Classified feed messages and stream faults
[OUTPUT]: Consumer reactions via overridable hook methods
[POS]:    WebSocket layer - event handler extension seam
[UPDATE]: When adding hooks or changing default behaviors
*/

use crate::http::ExioError;
use crate::ws::message::{FeedCategory, FeedMessage};
use async_trait::async_trait;
use tracing::{debug, error, info};

/// Event hooks the feed client calls through.
///
/// Consumers implement this trait and override the hooks they care about;
/// every method has a default. `on_update` is the single entry point the
/// dispatcher calls for classified traffic and by default branches to the
/// granular hooks, so overriding it intercepts everything.
#[async_trait]
pub trait FeedHandler: Send {
    /// Invoked once at the start of a session, before the socket opens
    async fn on_open(&mut self) {}

    /// Invoked for every classified message; default branches by category
    async fn on_update(&mut self, msg: &FeedMessage) {
        match msg.category() {
            Some(FeedCategory::Book) => self.on_book_update(msg).await,
            Some(FeedCategory::Order) => self.on_order_update(msg).await,
            Some(FeedCategory::Misc) => self.on_heartbeat(msg).await,
            // unrecognized types never reach the update hook; the dispatcher
            // routes them to on_error
            None => {}
        }
    }

    /// Order-book state change (bookOrders, add, remove, trade)
    async fn on_book_update(&mut self, msg: &FeedMessage) {
        info!(kind = %msg.kind, "book update");
    }

    /// Own-order lifecycle event (openOrders, accepted, rejected, canceled,
    /// executed)
    async fn on_order_update(&mut self, msg: &FeedMessage) {
        info!(kind = %msg.kind, "order update");
    }

    /// Liveness message
    async fn on_heartbeat(&mut self, msg: &FeedMessage) {
        debug!(kind = %msg.kind, "heartbeat");
    }

    /// Invoked for every stream fault, with the raw frame when available.
    /// Implementations must not panic; the client has already marked the
    /// session terminal before calling this.
    async fn on_error(&mut self, error: &ExioError, raw: Option<&str>) {
        error!(error = %error, raw = raw.unwrap_or(""), "feed error");
    }

    /// Invoked exactly once per session, after the socket is torn down
    async fn on_close(&mut self) {}
}

/// Handler that keeps all default hooks; useful for demos and smoke tests
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

#[async_trait]
impl FeedHandler for LogHandler {}
