/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market metadata (symbols, currencies, books, trades, rates)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{ExioError, ExioClient, Result};
use crate::types::{Candle, Currency, DayStats, OrderBook, ServerTime, SymbolList, Ticker, Trade};
use reqwest::Method;
use tracing::warn;

/// Granularities the candles endpoint accepts, in seconds
const ACCEPTED_GRANULARITIES: [u64; 6] = [60, 300, 900, 3600, 21600, 86400];

/// Page size the trades endpoint serves by default
const TRADES_PAGE_LIMIT: usize = 100;

impl ExioClient {
    /// List available currency pairs for trading
    ///
    /// GET /symbols
    pub async fn get_symbols(&self) -> Result<SymbolList> {
        let builder = self.request(Method::GET, "/symbols")?;
        self.send_json(builder).await
    }

    /// List known currencies
    ///
    /// GET /currencies
    pub async fn get_currencies(&self) -> Result<Vec<Currency>> {
        let builder = self.request(Method::GET, "/currencies")?;
        self.send_json(builder).await
    }

    /// Get the order book for a product; levels outside 1..=3 fall back to 1
    ///
    /// GET /products/{symbol}/book?level={level}
    pub async fn get_order_book(&self, symbol: &str, level: u8) -> Result<OrderBook> {
        let level = if (1..=3).contains(&level) { level } else { 1 };
        let endpoint = format!("/products/{symbol}/book");
        let builder = self
            .request(Method::GET, &endpoint)?
            .query(&[("level", level.to_string())]);
        self.send_json(builder).await
    }

    /// Snapshot of the last trade, best bid/ask and 24h volume
    ///
    /// GET /products/{symbol}/ticker
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker> {
        let endpoint = format!("/products/{symbol}/ticker");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// List the latest trades for a product, following `cb-after` pagination
    /// cursors until `limit` trades are collected (or one page when no limit
    /// is given)
    ///
    /// GET /products/{symbol}/trades
    pub async fn get_trades(
        &self,
        symbol: &str,
        before: Option<&str>,
        after: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Trade>> {
        let endpoint = format!("/products/{symbol}/trades");
        let mut trades: Vec<Trade> = Vec::new();
        let mut cursor = after.map(str::to_string);

        loop {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(before) = before {
                params.push(("before", before.to_string()));
            }
            if let Some(after) = &cursor {
                params.push(("after", after.clone()));
            }
            if let Some(target) = limit {
                let remaining = target - trades.len();
                if remaining < TRADES_PAGE_LIMIT {
                    params.push(("limit", remaining.to_string()));
                }
            }

            let builder = self.request(Method::GET, &endpoint)?.query(&params);
            let response = builder.send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ExioError::api_error(status, message));
            }

            let next = response
                .headers()
                .get("cb-after")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let page: Vec<Trade> = response.json().await?;
            let page_len = page.len();
            trades.extend(page);

            cursor = match (next, limit) {
                (Some(next), Some(target)) if trades.len() < target && page_len > 0 => Some(next),
                _ => break,
            };
        }

        Ok(trades)
    }

    /// Historic rates for a product; the granularity is snapped to the
    /// nearest accepted bucket
    ///
    /// GET /products/{symbol}/candles
    pub async fn get_historic_rates(
        &self,
        symbol: &str,
        start: Option<&str>,
        end: Option<&str>,
        granularity: Option<u64>,
    ) -> Result<Vec<Candle>> {
        let endpoint = format!("/products/{symbol}/candles");
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start {
            params.push(("start", start.to_string()));
        }
        if let Some(end) = end {
            params.push(("end", end.to_string()));
        }
        if let Some(granularity) = granularity {
            params.push(("granularity", snap_granularity(granularity).to_string()));
        }

        let builder = self.request(Method::GET, &endpoint)?.query(&params);
        self.send_json(builder).await
    }

    /// 24 hour stats for a product
    ///
    /// GET /products/{symbol}/stats
    pub async fn get_stats(&self, symbol: &str) -> Result<DayStats> {
        let endpoint = format!("/products/{symbol}/stats");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Get the API server time
    ///
    /// GET /time
    pub async fn get_time(&self) -> Result<ServerTime> {
        let builder = self.request(Method::GET, "/time")?;
        self.send_json(builder).await
    }
}

/// Snap a requested granularity to the nearest accepted bucket
fn snap_granularity(granularity: u64) -> u64 {
    let snapped = ACCEPTED_GRANULARITIES
        .into_iter()
        .min_by_key(|accepted| accepted.abs_diff(granularity))
        .unwrap_or(ACCEPTED_GRANULARITIES[0]);
    if snapped != granularity {
        warn!(requested = granularity, snapped, "granularity not accepted, snapping");
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::snap_granularity;
    use crate::http::{ClientConfig, ExioClient, ExioError};
    use crate::types::{BookLevel, Candle, Currency};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> ExioClient {
        ExioClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[test]
    fn test_snap_granularity() {
        assert_eq!(snap_granularity(60), 60);
        assert_eq!(snap_granularity(61), 60);
        assert_eq!(snap_granularity(1000), 900);
        assert_eq!(snap_granularity(1_000_000), 86400);
    }

    #[tokio::test]
    async fn test_get_symbols() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "msg": "ok",
            "symbols": [
                {
                    "name": "btc-usdt",
                    "description": "Bitcoin / U.S Dollar Tether",
                    "base": "btc",
                    "base_min_tick": "0.0001",
                    "base_min_size": "0.01",
                    "base_max_size": "100000",
                    "quote": "usdt",
                    "quote_min_tick": "1",
                    "fees": "usdt"
                }
            ]
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/symbols"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client.get_symbols().await.expect("get_symbols failed");

        assert_eq!(response.msg, "ok");
        assert_eq!(response.symbols.len(), 1);
        assert_eq!(response.symbols[0].name, "btc-usdt");
        assert_eq!(response.symbols[0].quote, "usdt");
    }

    #[tokio::test]
    async fn test_get_currencies() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {"id": "BTC", "name": "Bitcoin", "min_size": "0.00000001"},
            {"id": "USD", "name": "United States Dollar", "min_size": "0.01000000"}
        ]"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client.get_currencies().await.expect("get_currencies failed");

        let expected = vec![
            Currency {
                id: "BTC".to_string(),
                name: "Bitcoin".to_string(),
                min_size: "0.00000001".parse().expect("min_size"),
            },
            Currency {
                id: "USD".to_string(),
                name: "United States Dollar".to_string(),
                min_size: "0.01000000".parse().expect("min_size"),
            },
        ];
        assert_eq!(response, expected);
    }

    #[tokio::test]
    async fn test_get_order_book_level_fallback() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "sequence": "3",
            "bids": [["333.98", "0.5", 1]],
            "asks": [["333.99", "0.193", 2]]
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/products/btc-usdt/book"))
            .and(query_param("level", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        // level 9 is out of range and must fall back to 1
        let response = client
            .get_order_book("btc-usdt", 9)
            .await
            .expect("get_order_book failed");

        assert_eq!(response.sequence, "3");
        assert_eq!(
            response.asks,
            vec![BookLevel(
                "333.99".parse().expect("price"),
                "0.193".parse().expect("size"),
                2
            )]
        );
    }

    #[tokio::test]
    async fn test_get_ticker() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "trade_id": 4729088,
            "price": "333.99",
            "size": "0.193",
            "bid": "333.98",
            "ask": "333.99",
            "volume": "5957.11914015",
            "time": "2015-11-14T20:46:03.511254Z"
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/products/btc-usdt/ticker"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client.get_ticker("btc-usdt").await.expect("get_ticker failed");

        assert_eq!(response.trade_id, 4_729_088);
        assert_eq!(response.price, "333.99".parse().expect("price"));
    }

    #[tokio::test]
    async fn test_get_trades_follows_pagination_cursor() {
        let server = MockServer::start().await;
        let page = |id: i64| {
            format!(
                r#"[{{"time":"2014-11-07T22:19:28.578544Z","trade_id":{id},"price":"10.00000000","size":"0.01000000","side":"buy"}}]"#
            )
        };

        // First page carries a cursor; the follow-up request must use it.
        Mock::given(method("GET"))
            .and(path("/products/btc-usdt/trades"))
            .and(query_param("after", "74"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(page(73), "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/products/btc-usdt/trades"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .insert_header("cb-after", "74")
                    .set_body_raw(page(74), "application/json"),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let trades = client
            .get_trades("btc-usdt", None, None, Some(2))
            .await
            .expect("get_trades failed");

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].trade_id, 74);
        assert_eq!(trades[1].trade_id, 73);
    }

    #[tokio::test]
    async fn test_get_trades_single_page_without_limit() {
        let server = MockServer::start().await;
        let body = r#"[{"time":"2014-11-07T22:19:28.578544Z","trade_id":74,"price":"10.00000000","size":"0.01000000","side":"buy"}]"#;

        Mock::given(method("GET"))
            .and(path("/products/btc-usdt/trades"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .insert_header("cb-after", "74")
                    .set_body_raw(body, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let trades = client
            .get_trades("btc-usdt", None, None, None)
            .await
            .expect("get_trades failed");

        assert_eq!(trades.len(), 1);
    }

    #[tokio::test]
    async fn test_get_historic_rates_snaps_granularity() {
        let server = MockServer::start().await;
        let mock_response = r#"[[1415398768, 0.32, 4.2, 0.35, 4.2, 12.3]]"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/products/btc-usdt/candles"))
            .and(query_param("granularity", "60"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client
            .get_historic_rates("btc-usdt", None, None, Some(61))
            .await
            .expect("get_historic_rates failed");

        assert_eq!(response, vec![Candle(1_415_398_768, 0.32, 4.2, 0.35, 4.2, 12.3)]);
    }

    #[tokio::test]
    async fn test_get_stats() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "open": "34.19000000",
            "high": "95.70000000",
            "low": "7.06000000",
            "volume": "2.41000000"
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/products/btc-usdt/stats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client.get_stats("btc-usdt").await.expect("get_stats failed");

        assert_eq!(response.open, "34.19".parse().expect("open"));
    }

    #[tokio::test]
    async fn test_get_time() {
        let server = MockServer::start().await;
        let mock_response = r#"{"iso": "2015-01-07T23:47:25.201Z", "epoch": 1420674445.201}"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/time"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let response = client.get_time().await.expect("get_time failed");

        assert_eq!(response.iso, "2015-01-07T23:47:25.201Z");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/symbols"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let error = client.get_symbols().await.expect_err("expected API error");

        match error {
            ExioError::Api { code, message } => {
                assert_eq!(code, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
