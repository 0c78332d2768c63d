/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for REST API payloads
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading pair descriptor returned by `GET /symbols`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub description: String,
    pub base: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_min_tick: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_min_size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_max_size: Decimal,
    pub quote: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_min_tick: Decimal,
    pub fees: String,
}

/// Response envelope for `GET /symbols`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolList {
    pub msg: String,
    pub symbols: Vec<SymbolInfo>,
}

/// Currency descriptor returned by `GET /currencies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_size: Decimal,
}

/// One aggregated order book level: price, size, order count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel(
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    pub u64,
);

/// Order book snapshot for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub sequence: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

/// Last-trade snapshot with best bid/ask and 24h volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub trade_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ask: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    pub time: String,
}

/// A single executed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub time: String,
    pub trade_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub side: String,
}

/// Historic rate bucket: time, low, high, open, close, volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle(pub i64, pub f64, pub f64, pub f64, pub f64, pub f64);

/// 24 hour product statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
}

/// API server time in ISO and epoch form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTime {
    pub iso: String,
    pub epoch: f64,
}
