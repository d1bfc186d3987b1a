// ═══════════════════════════════════════════════════════════════════
// API Tests — RestPortfolioApi and CoinGeckoApi against a mock HTTP
// server, asserting the exact paths and payloads on the wire
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinfolio_core::api::coingecko::CoinGeckoApi;
use coinfolio_core::api::rest::RestPortfolioApi;
use coinfolio_core::api::traits::{MarketDataApi, PortfolioApi};
use coinfolio_core::errors::CoreError;
use coinfolio_core::models::coin::{NewHolding, NewTransaction, TxKind};
use coinfolio_core::models::ident::PortfolioRef;

const HEX_ID: &str = "5f2b8c9d1e0a7b6c5d4e3f2a";

fn alias() -> PortfolioRef {
    PortfolioRef::parse("abc").unwrap()
}

fn server_id() -> PortfolioRef {
    PortfolioRef::parse(HEX_ID).unwrap()
}

fn portfolio_body() -> serde_json::Value {
    json!({
        "_id": HEX_ID,
        "userId": "abc",
        "coins": [{
            "coinId": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "quantity": 2.0,
            "buyPrice": 100.0,
            "transactions": []
        }]
    })
}

// ═══════════════════════════════════════════════════════════════════
//  RestPortfolioApi
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn fetch_by_alias_uses_the_by_user_id_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio/byUserId/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let portfolio = api.fetch_portfolio(&alias()).await.unwrap();
    assert_eq!(portfolio.user_id.as_deref(), Some("abc"));
    assert_eq!(portfolio.coins.len(), 1);
}

#[tokio::test]
async fn fetch_by_server_id_addresses_the_portfolio_directly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/portfolio/{HEX_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let portfolio = api.fetch_portfolio(&server_id()).await.unwrap();
    assert_eq!(portfolio.id.as_deref(), Some(HEX_ID));
}

#[tokio::test]
async fn lookup_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio/byUserId/abc"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let err = api.fetch_portfolio(&alias()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio/byUserId/abc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let err = api.fetch_portfolio(&alias()).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));
}

#[tokio::test]
async fn create_posts_the_alias_as_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/portfolio/create"))
        .and(body_json(json!({ "userId": "abc" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "_id": HEX_ID, "userId": "abc", "coins": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let portfolio = api.create_portfolio("abc").await.unwrap();
    assert_eq!(portfolio.user_id.as_deref(), Some("abc"));
}

#[tokio::test]
async fn prices_share_the_identifier_path_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio/byUserId/abc/prices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "bitcoin": { "usd": 62000.0 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let snapshot = api.fetch_prices(&alias()).await.unwrap();
    assert_eq!(snapshot.usd("bitcoin"), 62000.0);
    assert_eq!(snapshot.usd("ethereum"), 0.0);
}

#[tokio::test]
async fn add_transaction_posts_the_wire_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/portfolio/byUserId/abc/coins/bitcoin/transactions"))
        .and(body_json(json!({
            "date": "2025-01-15",
            "type": "Buy",
            "shares": 2.0,
            "costPerShare": 100.0,
            "commission": 1.5,
            "note": "first buy",
            "symbol": "btc",
            "name": "Bitcoin"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let tx = NewTransaction {
        date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        kind: TxKind::Buy,
        shares: 2.0,
        cost_per_share: 100.0,
        commission: 1.5,
        note: "first buy".into(),
        symbol: "btc".into(),
        name: "Bitcoin".into(),
    };
    api.add_transaction(&alias(), "bitcoin", &tx).await.unwrap();
}

#[tokio::test]
async fn delete_transaction_targets_the_ledger_entry() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/portfolio/byUserId/abc/coins/bitcoin/transactions/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    api.delete_transaction(&alias(), "bitcoin", "t1")
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_delete_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/portfolio/byUserId/abc/coins/bitcoin/transactions/t1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let err = api
        .delete_transaction(&alias(), "bitcoin", "t1")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Api { .. }));
}

#[tokio::test]
async fn add_holding_posts_to_the_cryptos_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/portfolio/byUserId/abc/cryptos"))
        .and(body_json(json!({
            "coinId": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "quantity": 2.0,
            "buyPrice": 100.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestPortfolioApi::with_base_url(server.uri());
    let holding = NewHolding {
        coin_id: "bitcoin".into(),
        symbol: "btc".into(),
        name: "Bitcoin".into(),
        quantity: 2.0,
        buy_price: 100.0,
    };
    api.add_holding(&alias(), &holding).await.unwrap();
}

// ═══════════════════════════════════════════════════════════════════
//  CoinGeckoApi
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn list_coins_queries_markets_by_market_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/markets"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("order", "market_cap_desc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .and(query_param("sparkline", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            // real responses carry many more fields; only id/symbol/name matter
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
              "current_price": 62000.0, "market_cap": 1_000_000 },
            { "id": "ethereum", "symbol": "eth", "name": "Ethereum",
              "current_price": 3000.0, "market_cap": 500_000 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = CoinGeckoApi::with_base_url(server.uri());
    let coins = api.list_coins().await.unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].id, "bitcoin");
    assert_eq!(coins[1].symbol, "eth");
}

#[tokio::test]
async fn list_coins_surfaces_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/markets"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let api = CoinGeckoApi::with_base_url(server.uri());
    assert!(api.list_coins().await.is_err());
}
