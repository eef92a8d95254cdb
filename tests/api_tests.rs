//! Integration tests for tradier-rs.
//!
//! Every test runs against a local `wiremock` server standing in for the
//! brokerage, so no credentials or network access are needed. Response
//! bodies follow the shapes the live API produces, including its
//! inconsistent collection encodings.
//!
//! Run with: cargo test --test api_tests
//! Set RUST_LOG=tradier_rs=debug to see request logging.

use std::sync::Once;

use chrono::NaiveDate;
use futures_util::StreamExt;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradier_rs::prelude::*;

static INIT: Once = Once::new();

const TOKEN: &str = "test-token";
const DEFAULT_ACCOUNT: &str = "VA000001";

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Client pointed at `server` with a default account.
fn create_client(server: &MockServer) -> TradierClient {
    init_logging();
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_default_account(DEFAULT_ACCOUNT);
    TradierClient::with_config(TOKEN, config).expect("client builds")
}

/// Client pointed at `server` without a default account.
fn create_bare_client(server: &MockServer) -> TradierClient {
    init_logging();
    let config = ClientConfig::default().with_base_url(server.uri());
    TradierClient::with_config(TOKEN, config).expect("client builds")
}

async fn mock_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Form fields of the last request the server received.
async fn last_form(server: &MockServer) -> Vec<(String, String)> {
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    let request = requests.last().expect("at least one request");
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

fn field<'a>(form: &'a [(String, String)], name: &str) -> Option<&'a str> {
    form.iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

// =============================================================================
// Fixtures
// =============================================================================

fn account_json(number: &str) -> Value {
    json!({
        "account_number": number,
        "classification": "individual",
        "date_created": "2016-08-01T21:08:55.000Z",
        "day_trader": false,
        "option_level": 6,
        "status": "active",
        "type": "margin",
        "last_update_date": "2016-08-01T21:08:55.000Z"
    })
}

fn balances_json(number: &str) -> Value {
    json!({
        "balances": {
            "option_short_value": 0,
            "total_equity": 17798.36,
            "account_number": number,
            "account_type": "cash",
            "close_pl": -4813.0,
            "current_requirement": 2557.0,
            "equity": 0,
            "long_market_value": 5114.0,
            "market_value": 5114.0,
            "open_pl": 546.2,
            "option_long_value": 0,
            "option_requirement": 0,
            "pending_orders_count": 0,
            "short_market_value": 0,
            "stock_long_value": 5114.0,
            "total_cash": 12684.36,
            "uncleared_funds": 0,
            "pending_cash": 0,
            "cash": {
                "cash_available": 4343.38,
                "sweep": 0,
                "unsettled_funds": 1310.0
            }
        }
    })
}

fn position_json(id: i64, symbol: &str) -> Value {
    json!({
        "cost_basis": 207.01,
        "date_acquired": "2018-08-08T14:41:11.405Z",
        "id": id,
        "quantity": 1.0,
        "symbol": symbol
    })
}

fn event_json(amount: f64) -> Value {
    json!({
        "amount": amount,
        "date": "2018-05-23T00:00:00Z",
        "type": "trade",
        "trade": {
            "commission": 0.0,
            "description": "CALL GE     06/22/18    14",
            "price": 0.85,
            "quantity": -1.0,
            "symbol": "GE180622C00014000",
            "trade_type": "Option"
        }
    })
}

fn order_json(id: i64, class: &str) -> Value {
    json!({
        "id": id,
        "type": "market",
        "symbol": "AAPL",
        "side": "buy",
        "quantity": 50.0,
        "status": "filled",
        "duration": "pre",
        "avg_fill_price": 187.5,
        "exec_quantity": 50.0,
        "last_fill_price": 187.5,
        "last_fill_quantity": 50.0,
        "remaining_quantity": 0.0,
        "create_date": "2018-06-01T12:02:29.682Z",
        "transaction_date": "2018-06-01T12:30:02.385Z",
        "class": class
    })
}

fn leg_json(id: i64, option_symbol: &str, side: &str) -> Value {
    json!({
        "id": id,
        "type": "market",
        "symbol": "SPY",
        "side": side,
        "quantity": 1.0,
        "status": "filled",
        "duration": "day",
        "avg_fill_price": 1.45,
        "exec_quantity": 1.0,
        "last_fill_price": 1.45,
        "last_fill_quantity": 1.0,
        "remaining_quantity": 0.0,
        "create_date": "2018-06-12T21:13:36.076Z",
        "transaction_date": "2018-06-12T21:18:41.587Z",
        "class": "option",
        "option_symbol": option_symbol
    })
}

fn quote_json(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "description": "Apple Inc",
        "exch": "Q",
        "type": "stock",
        "last": 208.21,
        "change": -3.54,
        "volume": 25288395,
        "open": 204.29,
        "high": 208.71,
        "low": 203.5,
        "close": null,
        "bid": 208.19,
        "ask": 208.21,
        "change_percentage": -1.68,
        "average_volume": 27215269,
        "last_volume": 100,
        "trade_date": 1557168406000_i64,
        "prevclose": 211.75,
        "week_52_high": 233.47,
        "week_52_low": 142.0,
        "bidsize": 10,
        "bidexch": "Q",
        "bid_date": 1557168406000_i64,
        "asksize": 1,
        "askexch": "Y",
        "ask_date": 1557168406000_i64,
        "root_symbols": symbol
    })
}

fn option_json(symbol: &str, option_type: &str, strike: f64) -> Value {
    json!({
        "symbol": symbol,
        "description": "VXX May 17 2019 Option",
        "exch": "Z",
        "type": "option",
        "last": null,
        "change": null,
        "volume": 0,
        "open": null,
        "high": null,
        "low": null,
        "close": null,
        "bid": 0.0,
        "ask": 0.01,
        "underlying": "VXX",
        "strike": strike,
        "change_percentage": null,
        "average_volume": 0,
        "last_volume": 0,
        "trade_date": 0,
        "prevclose": null,
        "week_52_high": 0.0,
        "week_52_low": 0.0,
        "bidsize": 0,
        "bidexch": "C",
        "bid_date": 1557171657000_i64,
        "asksize": 611,
        "askexch": "Z",
        "ask_date": 1557172096000_i64,
        "open_interest": 10,
        "contract_size": 100,
        "expiration_date": "2019-05-17",
        "expiration_type": "standard",
        "option_type": option_type,
        "root_symbol": "VXX"
    })
}

fn security_json(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "exchange": "Q",
        "type": "stock",
        "description": "Apple Inc"
    })
}

// =============================================================================
// Transport
// =============================================================================

mod transport_tests {
    use super::*;

    #[tokio::test]
    async fn test_sends_bearer_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/clock"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clock": {
                    "date": "2019-05-06",
                    "description": "Market is open from 09:30 to 16:00",
                    "state": "open",
                    "timestamp": 1557156988,
                    "next_change": "16:00",
                    "next_state": "postmarket"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let clock = create_client(&server).market().clock().await.unwrap();
        assert!(clock.is_open());
    }

    #[tokio::test]
    async fn test_unauthorized_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/user/profile"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Access Token"))
            .mount(&server)
            .await;

        let err = create_client(&server).account().profile().await.unwrap_err();
        match &err {
            Error::Api { status, body } => {
                assert_eq!(*status, 401);
                assert_eq!(body, "Invalid Access Token");
            }
            other => panic!("Expected API error, got {other:?}"),
        }
        assert!(err.is_transport_error());
        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/etb"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = create_client(&server).market().etb().await.unwrap_err();
        assert!(err.is_server_error());
        assert!(!err.is_validation_error());
    }

    #[tokio::test]
    async fn test_malformed_json_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/clock"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = create_client(&server).market().clock().await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_transport_error());
    }
}

// =============================================================================
// Account data
// =============================================================================

mod account_tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_single_account_becomes_list() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/user/profile",
            json!({
                "profile": {
                    "id": "id-gcostanza",
                    "name": "George Costanza",
                    "account": account_json("VA000001")
                }
            }),
        )
        .await;

        let profile = create_client(&server).account().profile().await.unwrap();
        assert_eq!(profile.name, "George Costanza");
        assert_eq!(profile.account.len(), 1);
        assert_eq!(profile.account[0].account_number().as_str(), "VA000001");
    }

    #[tokio::test]
    async fn test_profile_multiple_accounts() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/user/profile",
            json!({
                "profile": {
                    "id": "id-gcostanza",
                    "name": "George Costanza",
                    "account": [account_json("VA000001"), account_json("VA000002")]
                }
            }),
        )
        .await;

        let profile = create_client(&server).account().profile().await.unwrap();
        assert_eq!(profile.account.len(), 2);
        assert_eq!(profile.account[1].account_number, "VA000002");
    }

    #[tokio::test]
    async fn test_balances_uses_default_account() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/accounts/VA000001/balances",
            balances_json("VA000001"),
        )
        .await;

        let balances = create_client(&server).account().balances(None).await.unwrap();
        assert_eq!(balances.account_number, "VA000001");
        assert_eq!(balances.total_cash, dec!(12684.36));
        assert!(balances.cash.is_some());
        assert!(balances.margin.is_none());
    }

    #[tokio::test]
    async fn test_explicit_account_overrides_for_one_call() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/accounts/VA000002/balances",
            balances_json("VA000002"),
        )
        .await;
        mock_get(
            &server,
            "/v1/accounts/VA000001/balances",
            balances_json("VA000001"),
        )
        .await;

        let client = create_client(&server);
        let other = AccountNumber::new("VA000002");

        let explicit = client.account().balances(Some(&other)).await.unwrap();
        assert_eq!(explicit.account_number, "VA000002");

        assert_eq!(client.default_account().map(|a| a.as_str()), Some(DEFAULT_ACCOUNT));
        let fallback = client.account().balances(None).await.unwrap();
        assert_eq!(fallback.account_number, "VA000001");
    }

    #[tokio::test]
    async fn test_missing_account_sends_nothing() {
        let server = MockServer::start().await;
        let client = create_bare_client(&server);

        let err = client.account().positions(None).await.unwrap_err();
        assert!(matches!(err, Error::MissingAccount));

        let err = client
            .trading()
            .cancel(None, OrderId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingAccount));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_positions_null_sentinel() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/accounts/VA000001/positions",
            json!({ "positions": "null" }),
        )
        .await;

        let positions = create_client(&server).account().positions(None).await.unwrap();
        assert!(positions.is_empty());
    }

    #[tokio::test]
    async fn test_positions_single_object() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/accounts/VA000001/positions",
            json!({ "positions": { "position": position_json(130089, "SPY") } }),
        )
        .await;

        let positions = create_client(&server).account().positions(None).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "SPY");
        assert_eq!(positions[0].cost_basis, dec!(207.01));
    }

    #[tokio::test]
    async fn test_history_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/history"))
            .and(query_param("type", "trade"))
            .and(query_param("start", "2018-05-01"))
            .and(query_param("end", "2018-05-31"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": { "event": event_json(-85.0) }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = HistoryQuery::new()
            .activity_type(ActivityType::Trade)
            .between(
                NaiveDate::from_ymd_opt(2018, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 5, 31).unwrap(),
            )
            .limit(25);
        let events = create_client(&server)
            .account()
            .history(None, query)
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "trade");
        assert_eq!(events[0].amount, dec!(-85));
        assert!(events[0].trade.is_some());
    }

    #[tokio::test]
    async fn test_history_stream_pages_until_short_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/history"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": { "event": [event_json(1.0), event_json(2.0)] }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/history"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": { "event": event_json(3.0) }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        let stream = client
            .account()
            .history_stream(None, HistoryQuery::new(), 2)
            .unwrap();
        let amounts: Vec<_> = stream.map(|e| e.unwrap().amount).collect().await;

        assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[tokio::test]
    async fn test_gain_loss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/gainloss"))
            .and(query_param("sortBy", "openDate"))
            .and(query_param("sort", "asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "gainloss": {
                    "closed_position": {
                        "close_date": "2018-10-31T00:00:00.000Z",
                        "cost": 12.7,
                        "gain_loss": -2.64,
                        "gain_loss_percent": -20.7874,
                        "open_date": "2018-06-19T00:00:00.000Z",
                        "proceeds": 10.06,
                        "quantity": 1.0,
                        "symbol": "GE",
                        "term": 134
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = GainLossQuery::new().sorted(GainLossSortKey::OpenDate, SortDirection::Asc);
        let closed = create_client(&server)
            .account()
            .gain_loss(None, query)
            .await
            .unwrap();

        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].gain_loss, dec!(-2.64));
        assert_eq!(closed[0].term, 134);
    }

    #[tokio::test]
    async fn test_gain_loss_stream_empty() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/accounts/VA000001/gainloss",
            json!({ "gainloss": "null" }),
        )
        .await;

        let client = create_client(&server);
        let closed: Vec<_> = client
            .account()
            .gain_loss_stream(None, GainLossQuery::new(), 50)
            .unwrap()
            .collect()
            .await;
        assert!(closed.is_empty());
    }

    #[tokio::test]
    async fn test_orders_null_sentinel_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/orders"))
            .and(query_param("includeTags", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orders": "null" })))
            .expect(1)
            .mount(&server)
            .await;

        let orders = create_client(&server)
            .account()
            .orders(None, true)
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_orders_with_single_leg_object() {
        let server = MockServer::start().await;
        let mut multileg = order_json(228749, "multileg");
        multileg["leg"] = leg_json(228750, "SPY180720C00274000", "buy_to_open");

        mock_get(
            &server,
            "/v1/accounts/VA000001/orders",
            json!({ "orders": { "order": [order_json(228175, "equity"), multileg] } }),
        )
        .await;

        let orders = create_client(&server)
            .account()
            .orders(None, false)
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert!(orders[0].legs().is_empty());
        assert_eq!(orders[1].legs().len(), 1);
        assert_eq!(
            orders[1].legs()[0].option_symbol.as_deref(),
            Some("SPY180720C00274000")
        );
    }

    #[tokio::test]
    async fn test_single_order_and_class_round_trip() {
        let server = MockServer::start().await;
        let mut multileg = order_json(228175, "multileg");
        multileg["leg"] = json!([
            leg_json(228176, "SPY180720C00274000", "buy_to_open"),
            leg_json(228177, "SPY180720C00275000", "sell_to_open"),
        ]);

        Mock::given(method("GET"))
            .and(path("/v1/accounts/VA000001/orders/228175"))
            .and(query_param("includeTags", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "order": multileg })))
            .expect(1)
            .mount(&server)
            .await;

        let order = create_client(&server)
            .account()
            .order(None, OrderId::new(228175), false)
            .await
            .unwrap();

        assert_eq!(order.order_id(), OrderId::new(228175));
        assert_eq!(order.order_class, "multileg");
        assert_eq!(order.legs().len(), 2);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["class"], "multileg");
        assert!(value.get("order_class").is_none());
    }
}

// =============================================================================
// Market data
// =============================================================================

mod market_tests {
    use super::*;

    #[tokio::test]
    async fn test_quotes_single_object_becomes_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/quotes"))
            .and(query_param("symbols", "AAPL,MSFT"))
            .and(query_param("greeks", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quotes": {
                    "quote": quote_json("AAPL"),
                    "unmatched_symbols": { "symbol": "MSFT" }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quotes = create_client(&server)
            .market()
            .quotes(&["AAPL", "MSFT"], false)
            .await
            .unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "AAPL");
        assert_eq!(quotes[0].bid, Some(dec!(208.19)));
    }

    #[tokio::test]
    async fn test_quotes_list() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/quotes",
            json!({ "quotes": { "quote": [quote_json("AAPL"), quote_json("MSFT")] } }),
        )
        .await;

        let quotes = create_client(&server)
            .market()
            .quotes(&["AAPL", "MSFT"], false)
            .await
            .unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].symbol, "MSFT");
    }

    #[tokio::test]
    async fn test_quotes_all_unmatched() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/quotes",
            json!({ "quotes": { "unmatched_symbols": { "symbol": "NOPE" } } }),
        )
        .await;

        let quotes = create_client(&server)
            .market()
            .quotes(&["NOPE"], false)
            .await
            .unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_quotes_require_symbols() {
        let server = MockServer::start().await;
        let err = create_client(&server)
            .market()
            .quotes(&[], false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_option_chain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/options/chains"))
            .and(query_param("symbol", "VXX"))
            .and(query_param("expiration", "2019-05-17"))
            .and(query_param("greeks", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "options": {
                    "option": [
                        option_json("VXX190517P00016000", "put", 16.0),
                        option_json("VXX190517C00016000", "call", 16.0)
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chain = create_client(&server)
            .market()
            .option_chain("VXX", NaiveDate::from_ymd_opt(2019, 5, 17).unwrap(), true)
            .await
            .unwrap();

        assert_eq!(chain.len(), 2);
        assert!(chain[0].is_put());
        assert!(chain[1].is_call());
        assert_eq!(chain[0].strike, dec!(16));
    }

    #[tokio::test]
    async fn test_invalid_option_type_is_validation_error() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/options/chains",
            json!({
                "options": { "option": option_json("VXX190517X00016000", "straddle", 16.0) }
            }),
        )
        .await;

        let err = create_client(&server)
            .market()
            .option_chain("VXX", NaiveDate::from_ymd_opt(2019, 5, 17).unwrap(), false)
            .await
            .unwrap_err();

        match err {
            Error::Validation { field, .. } => {
                assert_eq!(field, "options.option[0].option_type")
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_option_strikes() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/options/strikes",
            json!({ "strikes": { "strike": [95.0, 100.0, 105.0] } }),
        )
        .await;

        let strikes = create_client(&server)
            .market()
            .option_strikes("AAPL", NaiveDate::from_ymd_opt(2019, 5, 17).unwrap())
            .await
            .unwrap();
        assert_eq!(strikes, vec![dec!(95), dec!(100), dec!(105)]);
    }

    #[tokio::test]
    async fn test_option_expirations_single_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/options/expirations"))
            .and(query_param("includeAllRoots", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "expirations": { "date": "2019-05-17" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let expirations = create_client(&server)
            .market()
            .option_expirations("VXX", true)
            .await
            .unwrap();
        assert_eq!(expirations, vec![NaiveDate::from_ymd_opt(2019, 5, 17).unwrap()]);
    }

    #[tokio::test]
    async fn test_option_expirations_with_strikes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/options/expirations"))
            .and(query_param("strikes", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "expirations": {
                    "expiration": [
                        { "date": "2019-05-17", "strikes": { "strike": [10.0, 11.0] } },
                        { "date": "2019-05-24", "strikes": { "strike": 12.0 } }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let expirations = create_client(&server)
            .market()
            .option_expirations_with_strikes("VXX", false)
            .await
            .unwrap();
        assert_eq!(expirations.len(), 2);
        assert_eq!(expirations[0].strikes.strike.len(), 2);
        assert_eq!(expirations[1].strikes.strike, vec![dec!(12)]);
    }

    #[tokio::test]
    async fn test_lookup_options() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/options/lookup"))
            .and(query_param("underlying", "SPX"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbols": [
                    { "rootSymbol": "SPX", "options": ["SPX190621C02500000"] },
                    { "rootSymbol": "SPXW", "options": "SPXW190607C02880000" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let roots = create_client(&server)
            .market()
            .lookup_options("SPX")
            .await
            .unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].root_symbol, "SPXW");
        assert_eq!(roots[1].options, vec!["SPXW190607C02880000"]);
    }

    #[tokio::test]
    async fn test_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/history"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("interval", "daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": {
                    "day": [
                        { "date": "2019-01-02", "open": 154.89, "high": 158.85, "low": 154.23, "close": 157.92, "volume": 37039737 },
                        { "date": "2019-01-03", "open": 143.98, "high": 145.72, "low": 142.0, "close": 142.19, "volume": 91312195 }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let bars = create_client(&server)
            .market()
            .history("AAPL", HistoricalQuery::new().interval(HistoryInterval::Daily))
            .await
            .unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
        assert_eq!(bars[1].close, dec!(142.19));
    }

    #[tokio::test]
    async fn test_time_and_sales() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/timesales"))
            .and(query_param("interval", "1min"))
            .and(query_param("start", "2019-05-09 09:30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "series": {
                    "data": {
                        "time": "2019-05-09T09:30:00",
                        "timestamp": 1557408600,
                        "price": 200.34,
                        "open": 200.29,
                        "high": 200.4,
                        "low": 200.29,
                        "close": 200.35,
                        "volume": 12740,
                        "vwap": 200.34519
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let day = NaiveDate::from_ymd_opt(2019, 5, 9).unwrap();
        let query = TimesalesQuery::new()
            .interval(TimesalesInterval::OneMinute)
            .between(day.and_hms_opt(9, 30, 0).unwrap(), day.and_hms_opt(9, 31, 0).unwrap());
        let points = create_client(&server)
            .market()
            .time_and_sales("SPY", query)
            .await
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].vwap, dec!(200.34519));
    }

    #[tokio::test]
    async fn test_etb() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/etb",
            json!({ "securities": { "security": [security_json("AAPL"), security_json("MSFT")] } }),
        )
        .await;

        let securities = create_client(&server).market().etb().await.unwrap();
        assert_eq!(securities.len(), 2);
    }

    #[tokio::test]
    async fn test_calendar() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/calendar"))
            .and(query_param("month", "5"))
            .and(query_param("year", "2019"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calendar": {
                    "month": 5,
                    "year": 2019,
                    "days": {
                        "day": [
                            {
                                "date": "2019-05-01",
                                "status": "open",
                                "description": "Market is open",
                                "premarket": { "start": "07:00", "end": "09:24" },
                                "open": { "start": "09:30", "end": "16:00" },
                                "postmarket": { "start": "16:00", "end": "19:55" }
                            },
                            {
                                "date": "2019-05-04",
                                "status": "closed",
                                "description": "Market is closed"
                            }
                        ]
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let days = create_client(&server)
            .market()
            .calendar(Some(5), Some(2019))
            .await
            .unwrap();
        assert_eq!(days.len(), 2);
        assert!(days[0].is_trading_day());
        assert!(!days[1].is_trading_day());
    }

    #[tokio::test]
    async fn test_calendar_rejects_bad_month() {
        let server = MockServer::start().await;
        let err = create_client(&server)
            .market()
            .calendar(Some(13), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_null_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/search"))
            .and(query_param("q", "zzzz"))
            .and(query_param("indexes", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "securities": null })))
            .expect(1)
            .mount(&server)
            .await;

        let results = create_client(&server)
            .market()
            .search("zzzz", true)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_single_match() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            "/v1/markets/search",
            json!({ "securities": { "security": security_json("AAPL") } }),
        )
        .await;

        let results = create_client(&server)
            .market()
            .search("apple", false)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].security_type, "stock");
    }

    #[tokio::test]
    async fn test_lookup_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/markets/lookup"))
            .and(query_param("q", "goog"))
            .and(query_param("exchanges", "Q,N"))
            .and(query_param("types", "stock,etf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "securities": { "security": [security_json("GOOG"), security_json("GOOGL")] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let results = create_client(&server)
            .market()
            .lookup("goog", &["Q", "N"], &[SecurityType::Stock, SecurityType::Etf])
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_missing_securities_is_empty_list() {
        let server = MockServer::start().await;
        mock_get(&server, "/v1/markets/lookup", json!({})).await;

        let results = create_client(&server)
            .market()
            .lookup("qqqqq", &[], &[])
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}

// =============================================================================
// Trading
// =============================================================================

mod trading_tests {
    use super::*;

    fn ok_ack(id: i64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": id, "status": "ok", "partner_id": "3a8bbee1-5184-4ffe-8a0c-294fbad1aee9" }
        }))
    }

    #[tokio::test]
    async fn test_place_equity_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/VA000001/orders"))
            .and(body_string_contains("class=equity"))
            .respond_with(ok_ack(257459))
            .expect(1)
            .mount(&server)
            .await;

        let ack = create_client(&server)
            .trading()
            .place_equity(
                None,
                "AAPL",
                OrderSide::Buy,
                dec!(10),
                OrderTerms::limit(dec!(150.00), OrderDuration::Day).with_tag("my-tag-1"),
            )
            .await
            .unwrap();
        assert_eq!(ack.order_id(), OrderId::new(257459));

        let form = last_form(&server).await;
        assert_eq!(field(&form, "symbol"), Some("AAPL"));
        assert_eq!(field(&form, "side"), Some("buy"));
        assert_eq!(field(&form, "quantity"), Some("10"));
        assert_eq!(field(&form, "type"), Some("limit"));
        assert_eq!(field(&form, "duration"), Some("day"));
        assert_eq!(field(&form, "price"), Some("150"));
        assert_eq!(field(&form, "tag"), Some("my-tag-1"));
        assert_eq!(field(&form, "stop"), None);
    }

    #[tokio::test]
    async fn test_place_option_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/VA000001/orders"))
            .respond_with(ok_ack(257460))
            .expect(1)
            .mount(&server)
            .await;

        create_client(&server)
            .trading()
            .place_option(
                None,
                "SPY",
                "SPY190621C00280000",
                OrderSide::BuyToOpen,
                dec!(1),
                OrderTerms::market(OrderDuration::Day),
            )
            .await
            .unwrap();

        let form = last_form(&server).await;
        assert_eq!(field(&form, "class"), Some("option"));
        assert_eq!(field(&form, "option_symbol"), Some("SPY190621C00280000"));
        assert_eq!(field(&form, "side"), Some("buy_to_open"));
        assert_eq!(field(&form, "price"), None);
    }

    #[tokio::test]
    async fn test_two_leg_order_omits_higher_legs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/VA000001/orders"))
            .respond_with(ok_ack(257461))
            .expect(1)
            .mount(&server)
            .await;

        create_client(&server)
            .trading()
            .place_multileg(
                None,
                "SPY",
                vec![
                    OrderLeg::buy_to_open("SPY190621C00280000", dec!(1)),
                    OrderLeg::sell_to_open("SPY190621C00285000", dec!(1)),
                ],
                OrderTerms::net(OrderType::Debit, Some(dec!(1.05)), OrderDuration::Day),
            )
            .await
            .unwrap();

        let form = last_form(&server).await;
        assert_eq!(field(&form, "class"), Some("multileg"));
        assert_eq!(field(&form, "option_symbol[0]"), Some("SPY190621C00280000"));
        assert_eq!(field(&form, "side[0]"), Some("buy_to_open"));
        assert_eq!(field(&form, "quantity[0]"), Some("1"));
        assert_eq!(field(&form, "option_symbol[1]"), Some("SPY190621C00285000"));
        assert_eq!(field(&form, "side[1]"), Some("sell_to_open"));
        assert_eq!(field(&form, "quantity[1]"), Some("1"));

        for (name, value) in &form {
            assert!(!name.contains("[2]") && !name.contains("[3]"), "unexpected {name}");
            assert_ne!(value, "null", "{name} sent as null");
            assert!(!value.is_empty(), "{name} sent empty");
        }
    }

    #[tokio::test]
    async fn test_too_many_legs_rejected_locally() {
        let server = MockServer::start().await;
        let legs = (0..5)
            .map(|i| OrderLeg::buy_to_open(format!("SPY19062{i}C00280000"), dec!(1)))
            .collect();

        let err = create_client(&server)
            .trading()
            .place_multileg(None, "SPY", legs, OrderTerms::market(OrderDuration::Day))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejection_carries_messages_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/VA000001/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": {
                    "error": [
                        "Backoffice rejected override of the order.",
                        "InitialMargin"
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = create_client(&server)
            .trading()
            .place_equity(
                None,
                "AAPL",
                OrderSide::Buy,
                dec!(1000000),
                OrderTerms::market(OrderDuration::Day),
            )
            .await
            .unwrap_err();

        assert!(err.is_order_rejection());
        assert!(!err.is_transport_error());
        match err {
            Error::OrderRejected { messages } => assert_eq!(
                messages,
                vec![
                    "Backoffice rejected override of the order.".to_string(),
                    "InitialMargin".to_string()
                ]
            ),
            other => panic!("Expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_preview_sends_preview_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/VA000001/orders"))
            .and(body_string_contains("preview=true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "order": {
                    "status": "ok",
                    "commission": 0.0,
                    "cost": 1500.0,
                    "fees": 0.0,
                    "symbol": "AAPL",
                    "quantity": 10,
                    "side": "buy",
                    "type": "limit",
                    "duration": "day",
                    "result": true,
                    "order_cost": 1500.0,
                    "margin_change": 0.0,
                    "class": "equity",
                    "strategy": "equity"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = NewOrderBuilder::equity("AAPL", OrderSide::Buy, dec!(10))
            .order_type(OrderType::Limit)
            .price(dec!(150))
            .build()
            .unwrap();
        let preview = create_client(&server)
            .trading()
            .preview(None, &order)
            .await
            .unwrap();

        assert_eq!(preview.cost, Some(dec!(1500)));
        assert_eq!(preview.result, Some(true));
    }

    #[tokio::test]
    async fn test_modify_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/accounts/VA000002/orders/257459"))
            .respond_with(ok_ack(257459))
            .expect(1)
            .mount(&server)
            .await;

        let account = AccountNumber::new("VA000002");
        create_client(&server)
            .trading()
            .modify(
                Some(&account),
                OrderId::new(257459),
                &OrderChanges::new().price(dec!(1.10)),
            )
            .await
            .unwrap();

        let form = last_form(&server).await;
        assert_eq!(form, vec![("price".to_string(), "1.1".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_modify_rejected_locally() {
        let server = MockServer::start().await;
        let err = create_client(&server)
            .trading()
            .modify(None, OrderId::new(257459), &OrderChanges::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/accounts/VA000001/orders/257459"))
            .respond_with(ok_ack(257459))
            .expect(1)
            .mount(&server)
            .await;

        let ack = create_client(&server)
            .trading()
            .cancel(None, OrderId::new(257459))
            .await
            .unwrap();
        assert_eq!(ack.status, "ok");
    }

    #[tokio::test]
    async fn test_cancel_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/accounts/VA000001/orders/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": { "error": "Order is not in a cancelable state" }
            })))
            .mount(&server)
            .await;

        let err = create_client(&server)
            .trading()
            .cancel(None, OrderId::new(1))
            .await
            .unwrap_err();
        match err {
            Error::OrderRejected { messages } => {
                assert_eq!(messages, vec!["Order is not in a cancelable state".to_string()])
            }
            other => panic!("Expected rejection, got {other:?}"),
        }
    }
}
