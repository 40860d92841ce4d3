//! Integration tests for the btc-data CLI. None of these reach the network:
//! they either list tools or fail before any upstream request is made.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn btc_data_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("btc-data"));
    cmd.env("BTC_DATA_HOME", home.path())
        .env("BTC_DATA_CALL_LOG", "0")
        .env("BTC_EXPLORER_URL", "http://127.0.0.1:9")
        .env("BTC_PRICE_URL", "http://127.0.0.1:9")
        .env("BTC_NETWORK_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn tools_lists_every_tool() {
    let home = TempDir::new().unwrap();
    btc_data_cmd(&home)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("get_block"))
        .stdout(predicate::str::contains("analyze_utxo_distribution"))
        .stdout(predicate::str::contains(
            "Detect patterns in a transaction (basic analysis)",
        ));
}

#[test]
fn tools_json_includes_schemas() {
    let home = TempDir::new().unwrap();
    let output = btc_data_cmd(&home)
        .args(["tools", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tools: Value = serde_json::from_slice(&output.stdout).unwrap();
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 12);
    assert_eq!(tools[0]["name"], "get_block");
    assert_eq!(
        tools[10]["inputSchema"]["required"],
        serde_json::json!(["txid", "output_index"])
    );
}

#[test]
fn call_unknown_tool_fails() {
    let home = TempDir::new().unwrap();
    btc_data_cmd(&home)
        .args(["call", "get_weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tool: get_weather"))
        .stderr(predicate::str::contains("-32601"));
}

#[test]
fn call_with_missing_argument_fails_before_fetching() {
    let home = TempDir::new().unwrap();
    btc_data_cmd(&home)
        .args(["call", "get_transaction", "--input", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid arguments for get_transaction"))
        .stderr(predicate::str::contains("txid"));
}

#[test]
fn call_rejects_unparsable_input() {
    let home = TempDir::new().unwrap();
    btc_data_cmd(&home)
        .args(["call", "get_block", "--input", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn call_reads_input_from_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.json");
    std::fs::write(&input, r#"{"block_hash_or_height": "../mempool"}"#).unwrap();

    btc_data_cmd(&home)
        .args(["call", "get_block", "--file"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be alphanumeric"));
}

#[test]
fn unreachable_upstream_is_reported() {
    let home = TempDir::new().unwrap();
    btc_data_cmd(&home)
        .args(["call", "analyze_fee_landscape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("get_fee_estimates failed"));
}
