//! Provider behaviour against an in-memory upstream.

use std::sync::Arc;
use std::time::Duration;

use btc_data_provider::{DataProviders, ProviderError};
use btc_transport::{Endpoints, StubSource};
use serde_json::{json, Value};

const EXPLORER: &str = "http://explorer.test";
const PRICE: &str = "http://price.test";
const NETWORK: &str = "http://network.test";

fn endpoints() -> Endpoints {
    Endpoints {
        explorer: EXPLORER.to_string(),
        price: PRICE.to_string(),
        network: NETWORK.to_string(),
    }
}

fn providers(stub: &Arc<StubSource>) -> DataProviders {
    DataProviders::new(stub.clone(), &endpoints())
}

fn block_json(height: u64) -> Value {
    json!({
        "id": format!("{:064x}", height),
        "height": height,
        "version": 536870912,
        "timestamp": 1700000000,
        "tx_count": 2500,
        "size": 1500000,
        "weight": 3990000,
        "merkle_root": "ab".repeat(32),
        "previousblockhash": "cd".repeat(32),
        "nonce": 12345,
        "bits": 386089497,
        "difficulty": 6.2e13
    })
}

fn utxos_json() -> Value {
    json!([
        {"txid": "aa".repeat(32), "vout": 0, "status": {"confirmed": true, "block_height": 800000}, "value": 150000},
        {"txid": "bb".repeat(32), "vout": 1, "status": {"confirmed": false}, "value": 400}
    ])
}

fn register_network(stub: &StubSource) {
    stub.respond(
        format!("{}/v1/difficulty-adjustment", NETWORK),
        json!({"progressPercent": 41.2, "difficultyChange": 2.7, "remainingBlocks": 1185}),
    );
    stub.respond(
        format!("{}/v1/hashrate", NETWORK),
        json!({"hashrates": [], "difficulty": [], "currentHashrate": 6.1e20, "currentDifficulty": 8.3e13}),
    );
    stub.respond(
        format!("{}/mempool", NETWORK),
        json!({"count": 31000, "vsize": 18000000, "total_fee": 9100000, "fee_histogram": []}),
    );
    stub.respond(
        format!("{}/v1/fees/recommended", NETWORK),
        json!({"fastestFee": 42, "halfHourFee": 30, "hourFee": 21, "economyFee": 10, "minimumFee": 5}),
    );
}

#[tokio::test]
async fn cached_block_is_served_without_second_upstream_call() {
    let stub = Arc::new(StubSource::new());
    let url = format!("{}/block/800000", EXPLORER);
    stub.respond(url.clone(), block_json(800000));
    let providers = providers(&stub);

    let first = providers.explorer.get_block("800000").await.unwrap();
    let second = providers.explorer.get_block("800000").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.height, 800000);
    assert_eq!(stub.calls(&url), 1);

    let stats = providers.explorer.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn transaction_and_address_are_cached_per_key() {
    let stub = Arc::new(StubSource::new());
    let tx_url = format!("{}/tx/{}", EXPLORER, "ee".repeat(32));
    stub.respond(
        tx_url.clone(),
        json!({
            "txid": "ee".repeat(32), "size": 225, "weight": 573, "fee": 2820,
            "status": {"confirmed": true, "block_height": 800001},
            "vin": [], "vout": []
        }),
    );
    let addr_url = format!("{}/address/bc1qtest", EXPLORER);
    stub.respond(
        addr_url.clone(),
        json!({
            "address": "bc1qtest",
            "chain_stats": {"funded_txo_count": 3, "funded_txo_sum": 500000, "spent_txo_count": 1, "spent_txo_sum": 200000, "tx_count": 4},
            "mempool_stats": {"funded_txo_count": 0, "funded_txo_sum": 0, "spent_txo_count": 0, "spent_txo_sum": 0, "tx_count": 0}
        }),
    );
    let providers = providers(&stub);

    for _ in 0..3 {
        providers.explorer.get_transaction(&"ee".repeat(32)).await.unwrap();
        let info = providers.explorer.get_address("bc1qtest").await.unwrap();
        assert_eq!(info.chain_stats.balance(), 300000);
    }
    assert_eq!(stub.calls(&tx_url), 1);
    assert_eq!(stub.calls(&addr_url), 1);
}

#[tokio::test]
async fn utxos_are_cached() {
    let stub = Arc::new(StubSource::new());
    let url = format!("{}/address/bc1qtest/utxo", EXPLORER);
    stub.respond(url.clone(), utxos_json());
    let providers = providers(&stub);

    let utxos = providers.explorer.get_address_utxos("bc1qtest").await.unwrap();
    providers.explorer.get_address_utxos("bc1qtest").await.unwrap();

    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].value, 150000);
    assert_eq!(stub.calls(&url), 1);
}

#[tokio::test]
async fn address_transactions_are_never_cached() {
    let stub = Arc::new(StubSource::new());
    let first_page = format!("{}/address/bc1qtest/txs", EXPLORER);
    let next_page = format!("{}/address/bc1qtest/txs/chain/{}", EXPLORER, "ff".repeat(32));
    stub.respond(first_page.clone(), json!([]));
    stub.respond(next_page.clone(), json!([]));
    let providers = providers(&stub);

    providers
        .explorer
        .get_address_transactions("bc1qtest", None)
        .await
        .unwrap();
    providers
        .explorer
        .get_address_transactions("bc1qtest", None)
        .await
        .unwrap();
    providers
        .explorer
        .get_address_transactions("bc1qtest", Some(&"ff".repeat(32)))
        .await
        .unwrap();

    assert_eq!(stub.calls(&first_page), 2);
    assert_eq!(stub.calls(&next_page), 1);
}

#[tokio::test]
async fn unknown_block_is_upstream_failure() {
    let stub = Arc::new(StubSource::new());
    let providers = providers(&stub);

    let err = providers.explorer.get_block("nope").await.unwrap_err();
    assert_eq!(err.operation(), "get_block");
    assert!(err.cause().contains("404"), "{}", err);
}

#[tokio::test]
async fn malformed_body_fails_and_is_not_cached() {
    let stub = Arc::new(StubSource::new());
    let url = format!("{}/block/1", EXPLORER);
    stub.respond(url.clone(), json!({"unexpected": true}));
    let providers = providers(&stub);

    let err = providers.explorer.get_block("1").await.unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { .. }));
    assert!(err.cause().contains("malformed body"));

    stub.respond(url.clone(), block_json(1));
    let block = providers.explorer.get_block("1").await.unwrap();
    assert_eq!(block.height, 1);
    assert_eq!(stub.calls(&url), 2);
}

#[tokio::test]
async fn price_and_history_use_separate_keys() {
    let stub = Arc::new(StubSource::new());
    let price_url = format!(
        "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true&include_24hr_vol=true&include_market_cap=true",
        PRICE
    );
    stub.respond(
        price_url.clone(),
        json!({"bitcoin": {"usd": 64000.0, "usd_24h_change": -1.5, "usd_24h_vol": 2.5e10, "usd_market_cap": 1.26e12}}),
    );
    let week_url = format!("{}/coins/bitcoin/market_chart?vs_currency=usd&days=7", PRICE);
    let month_url = format!("{}/coins/bitcoin/market_chart?vs_currency=usd&days=30", PRICE);
    stub.respond(week_url.clone(), json!({"prices": [[1700000000000u64, 60000.0], [1700086400000u64, 61000.0]]}));
    stub.respond(month_url.clone(), json!({"prices": [[1700000000000u64, 50000.0]]}));
    let providers = providers(&stub);

    let price = providers.price.get_price().await.unwrap();
    providers.price.get_price().await.unwrap();
    assert_eq!(price.bitcoin.usd, 64000.0);
    assert_eq!(stub.calls(&price_url), 1);

    let week = providers.price.get_historical_price(7).await.unwrap();
    let month = providers.price.get_historical_price(30).await.unwrap();
    providers.price.get_historical_price(7).await.unwrap();
    assert_eq!(week.len(), 2);
    assert_eq!(month.len(), 1);
    assert_eq!(stub.calls(&week_url), 1);
    assert_eq!(stub.calls(&month_url), 1);
}

#[tokio::test]
async fn network_metrics_join_all_four_and_cache() {
    let stub = Arc::new(StubSource::new());
    register_network(&stub);
    let providers = providers(&stub);

    let metrics = providers.network.get_network_metrics().await.unwrap();
    assert_eq!(metrics.difficulty, 2.7);
    assert_eq!(metrics.hashrate, 6.1e20);
    assert_eq!(metrics.mempool_size, 31000);
    assert_eq!(metrics.fee_estimates.fastest_fee, 42.0);

    let cached = providers.network.get_network_metrics().await.unwrap();
    assert_eq!(cached, metrics);
    assert_eq!(stub.total_calls(), 4);
    assert_eq!(providers.network.cache_stats().hits, 1);
}

#[tokio::test]
async fn network_metrics_fail_whole_when_one_call_fails() {
    let stub = Arc::new(StubSource::new());
    register_network(&stub);
    stub.fail(format!("{}/v1/hashrate", NETWORK), 502);
    let providers = providers(&stub);

    let err = providers.network.get_network_metrics().await.unwrap_err();
    assert_eq!(err.operation(), "get_network_metrics");
    assert!(err.cause().contains("502"));

    // Nothing partial was cached: a recovered upstream triggers a fresh join.
    stub.respond(
        format!("{}/v1/hashrate", NETWORK),
        json!({"currentHashrate": 5.0e20}),
    );
    let metrics = providers.network.get_network_metrics().await.unwrap();
    assert_eq!(metrics.hashrate, 5.0e20);
    assert_eq!(stub.calls(&format!("{}/v1/hashrate", NETWORK)), 2);
}

#[tokio::test(start_paused = true)]
async fn network_metrics_calls_run_concurrently() {
    let stub = Arc::new(StubSource::new().with_latency(Duration::from_millis(100)));
    register_network(&stub);
    let providers = providers(&stub);

    let start = tokio::time::Instant::now();
    providers.network.get_network_metrics().await.unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_millis(200), "took {:?}", elapsed);
}

#[tokio::test]
async fn fee_estimates_and_mempool_are_uncached() {
    let stub = Arc::new(StubSource::new());
    register_network(&stub);
    let providers = providers(&stub);

    providers.network.get_fee_estimates().await.unwrap();
    providers.network.get_fee_estimates().await.unwrap();
    let mempool = providers.network.get_mempool_info().await.unwrap();
    providers.network.get_mempool_info().await.unwrap();

    assert_eq!(mempool.count, 31000);
    assert_eq!(stub.calls(&format!("{}/v1/fees/recommended", NETWORK)), 2);
    assert_eq!(stub.calls(&format!("{}/mempool", NETWORK)), 2);
}

async fn fetch_explorer(providers: &DataProviders) {
    providers.explorer.get_block("1").await.unwrap();
    providers.explorer.get_transaction(&"ee".repeat(32)).await.unwrap();
    providers.explorer.get_address("bc1qtest").await.unwrap();
    providers.explorer.get_address_utxos("bc1qtest").await.unwrap();
}

async fn advance_secs(secs: u64) {
    tokio::time::advance(Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn utxos_expire_before_blocks_transactions_and_addresses() {
    let stub = Arc::new(StubSource::new());
    let block_url = format!("{}/block/1", EXPLORER);
    let tx_url = format!("{}/tx/{}", EXPLORER, "ee".repeat(32));
    let addr_url = format!("{}/address/bc1qtest", EXPLORER);
    let utxo_url = format!("{}/address/bc1qtest/utxo", EXPLORER);
    stub.respond(block_url.clone(), block_json(1));
    stub.respond(
        tx_url.clone(),
        json!({
            "txid": "ee".repeat(32), "size": 225, "weight": 573, "fee": 2820,
            "status": {"confirmed": true, "block_height": 800001},
            "vin": [], "vout": []
        }),
    );
    stub.respond(
        addr_url.clone(),
        json!({
            "address": "bc1qtest",
            "chain_stats": {"funded_txo_count": 1, "funded_txo_sum": 1000, "spent_txo_count": 0, "spent_txo_sum": 0, "tx_count": 1},
            "mempool_stats": {"funded_txo_count": 0, "funded_txo_sum": 0, "spent_txo_count": 0, "spent_txo_sum": 0, "tx_count": 0}
        }),
    );
    stub.respond(utxo_url.clone(), utxos_json());
    let providers = providers(&stub);

    fetch_explorer(&providers).await;
    advance_secs(59).await;
    fetch_explorer(&providers).await;
    assert_eq!(stub.calls(&utxo_url), 1);

    advance_secs(2).await;
    fetch_explorer(&providers).await;
    assert_eq!(stub.calls(&utxo_url), 2);
    assert_eq!(stub.calls(&block_url), 1);

    advance_secs(59).await;
    fetch_explorer(&providers).await;
    assert_eq!(stub.calls(&block_url), 1);
    assert_eq!(stub.calls(&tx_url), 1);
    assert_eq!(stub.calls(&addr_url), 1);

    advance_secs(181).await;
    fetch_explorer(&providers).await;
    assert_eq!(stub.calls(&block_url), 2);
    assert_eq!(stub.calls(&tx_url), 2);
    assert_eq!(stub.calls(&addr_url), 2);
}

#[tokio::test(start_paused = true)]
async fn price_expires_before_history() {
    let stub = Arc::new(StubSource::new());
    let price_url = format!(
        "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true&include_24hr_vol=true&include_market_cap=true",
        PRICE
    );
    let history_url = format!("{}/coins/bitcoin/market_chart?vs_currency=usd&days=7", PRICE);
    stub.respond(
        price_url.clone(),
        json!({"bitcoin": {"usd": 64000.0, "usd_24h_change": 0.5, "usd_24h_vol": 2.5e10, "usd_market_cap": 1.26e12}}),
    );
    stub.respond(history_url.clone(), json!({"prices": [[1700000000000u64, 60000.0]]}));
    let providers = providers(&stub);

    providers.price.get_price().await.unwrap();
    providers.price.get_historical_price(7).await.unwrap();

    advance_secs(301).await;
    providers.price.get_price().await.unwrap();
    providers.price.get_historical_price(7).await.unwrap();
    assert_eq!(stub.calls(&price_url), 2);
    assert_eq!(stub.calls(&history_url), 1);

    advance_secs(1500).await;
    providers.price.get_historical_price(7).await.unwrap();
    assert_eq!(stub.calls(&history_url), 2);
}

#[tokio::test(start_paused = true)]
async fn network_metrics_expire_after_a_minute() {
    let stub = Arc::new(StubSource::new());
    register_network(&stub);
    let providers = providers(&stub);
    let hashrate_url = format!("{}/v1/hashrate", NETWORK);

    providers.network.get_network_metrics().await.unwrap();
    advance_secs(59).await;
    providers.network.get_network_metrics().await.unwrap();
    assert_eq!(stub.calls(&hashrate_url), 1);

    advance_secs(2).await;
    providers.network.get_network_metrics().await.unwrap();
    assert_eq!(stub.calls(&hashrate_url), 2);
    assert_eq!(stub.total_calls(), 8);
}
