/*
[INPUT]:  Feed subscription parameters (symbols, channels, auth headers)
[OUTPUT]: Serializable subscribe request matching the feed wire format
[POS]:    Data layer - outbound feed request types
[UPDATE]: When the subscribe frame format or channel defaults change
*/

use crate::auth::AuthHeaders;
use serde::{Deserialize, Serialize};

/// Symbol the feed subscribes to when none are configured
pub const DEFAULT_SYMBOL: &str = "btc-usdt";

/// Channel name used when no explicit channel list is configured
pub const DEFAULT_CHANNEL: &str = "books";

/// Symbol selection: a single bare symbol or an explicit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbols {
    One(String),
    Many(Vec<String>),
}

impl Symbols {
    /// Normalize into a symbol list (a bare symbol becomes a one-element list)
    pub fn into_list(self) -> Vec<String> {
        match self {
            Symbols::One(symbol) => vec![symbol],
            Symbols::Many(symbols) => symbols,
        }
    }
}

impl From<&str> for Symbols {
    fn from(symbol: &str) -> Self {
        Symbols::One(symbol.to_string())
    }
}

impl From<String> for Symbols {
    fn from(symbol: String) -> Self {
        Symbols::One(symbol)
    }
}

impl From<Vec<String>> for Symbols {
    fn from(symbols: Vec<String>) -> Self {
        Symbols::Many(symbols)
    }
}

impl From<Vec<&str>> for Symbols {
    fn from(symbols: Vec<&str>) -> Self {
        Symbols::Many(symbols.into_iter().map(str::to_string).collect())
    }
}

/// Resolve an optional symbol selection to the final subscription list
pub fn resolve_symbols(symbols: Option<Symbols>) -> Vec<String> {
    match symbols {
        None => vec![DEFAULT_SYMBOL.to_string()],
        Some(symbols) => symbols.into_list(),
    }
}

/// A named subscription topic with the symbols it streams updates for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub symbols: Vec<String>,
}

impl Channel {
    pub fn new(name: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            name: name.into(),
            symbols,
        }
    }
}

/// Initial subscribe frame, immutable once sent.
///
/// Auth headers, when present, are flattened into the top level of the
/// serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    #[serde(rename = "type")]
    pub message_type: String,
    pub channels: Vec<Channel>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthHeaders>,
}

impl SubscribeRequest {
    /// Build an unauthenticated subscribe request over the given channels
    pub fn subscribe(channels: Vec<Channel>) -> Self {
        Self {
            message_type: "subscribe".to_string(),
            channels,
            auth: None,
        }
    }

    /// Attach signed auth headers to the request
    pub fn with_auth(mut self, auth: AuthHeaders) -> Self {
        self.auth = Some(auth);
        self
    }
}
