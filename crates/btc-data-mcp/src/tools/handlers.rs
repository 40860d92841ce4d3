//! MCP tool handler implementations.
//!
//! Each handler parses its arguments, makes the provider calls it needs and
//! composes the result from the raw data plus the pure transforms in
//! [`crate::analysis`].

use futures::future::join_all;
use serde_json::{json, Value};

use btc_data_types::PricePoint;

use crate::analysis::{
    analyze_address, analyze_block, analyze_fees, analyze_history, analyze_mempool,
    analyze_network, analyze_price, analyze_transaction, derive_balance, detect_patterns,
    fee_recommendations, predict_mempool, summarize_distribution, summarize_utxos,
    trace_first_hop, LINEAGE_NOTE,
};
use crate::error::ToolError;
use crate::state::{ToolDispatcher, ToolOutput};

use super::inputs::{
    extract_input, path_segment, DetectPatternsInput, FeeLandscapeInput, GetAddressInput,
    GetBlockInput, GetTransactionInput, GetUtxosInput, HistoricalPriceInput, MempoolStateInput,
    TimeframeInput, TraceLineageInput, UtxoDistributionInput,
};

const BLOCK_TRANSACTIONS_NOTE: &str =
    "Transaction details require individual transaction queries due to API limitations";

type ToolResult = Result<ToolOutput, ToolError>;

impl ToolDispatcher {
    pub async fn get_block(&self, input: Value) -> ToolResult {
        const TOOL: &str = "get_block";
        let parsed: GetBlockInput = extract_input(TOOL, input)?;
        let id = path_segment(TOOL, "block_hash_or_height", &parsed.block_hash_or_height)?;

        let block = self.providers().explorer.get_block(id).await?;
        let mut result = json!({
            "block_info": block,
            "analysis": analyze_block(&block),
        });
        if parsed.include_transactions {
            result["note"] = json!(BLOCK_TRANSACTIONS_NOTE);
        }
        Ok(ToolOutput::new(result))
    }

    pub async fn get_transaction(&self, input: Value) -> ToolResult {
        const TOOL: &str = "get_transaction";
        let parsed: GetTransactionInput = extract_input(TOOL, input)?;
        let txid = path_segment(TOOL, "txid", &parsed.txid)?;

        let transaction = self.providers().explorer.get_transaction(txid).await?;
        let mut result = json!({ "transaction": transaction });
        if parsed.include_analysis {
            result["analysis"] = json!(analyze_transaction(&transaction));
        }
        Ok(ToolOutput::new(result))
    }

    pub async fn get_address(&self, input: Value) -> ToolResult {
        const TOOL: &str = "get_address";
        let parsed: GetAddressInput = extract_input(TOOL, input)?;
        let address = path_segment(TOOL, "address", &parsed.address)?;

        let explorer = &self.providers().explorer;
        let (info, utxos, history) = tokio::try_join!(
            explorer.get_address(address),
            explorer.get_address_utxos(address),
            explorer.get_address_transactions(address, None),
        )?;

        let recent: Vec<_> = history
            .into_iter()
            .skip(usize::try_from(parsed.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(parsed.limit).unwrap_or(usize::MAX))
            .collect();

        Ok(ToolOutput::new(json!({
            "address_info": info,
            "balance": derive_balance(&info),
            "utxo_count": utxos.len(),
            "recent_transactions": recent,
            "analysis": analyze_address(&info, utxos.len()),
        })))
    }

    pub async fn get_utxos(&self, input: Value) -> ToolResult {
        const TOOL: &str = "get_utxos";
        let parsed: GetUtxosInput = extract_input(TOOL, input)?;
        let address = path_segment(TOOL, "address", &parsed.address)?;

        let utxos: Vec<_> = self
            .providers()
            .explorer
            .get_address_utxos(address)
            .await?
            .into_iter()
            .filter(|utxo| utxo.value >= parsed.min_value)
            .collect();

        Ok(ToolOutput::new(json!({
            "summary": summarize_utxos(&utxos),
            "utxos": utxos,
        })))
    }

    pub async fn get_price_data(&self, input: Value) -> ToolResult {
        // `timeframe` is advertised but only the current quote is served.
        let _parsed: TimeframeInput = extract_input("get_price_data", input)?;

        let price = self.providers().price.get_price().await?.bitcoin;
        Ok(ToolOutput::new(json!({
            "analysis": analyze_price(&price),
            "current_price": price,
        })))
    }

    pub async fn get_historical_price(&self, input: Value) -> ToolResult {
        const TOOL: &str = "get_historical_price";
        let parsed: HistoricalPriceInput = extract_input(TOOL, input)?;
        let days = u32::try_from(parsed.days)
            .ok()
            .filter(|&days| days > 0)
            .ok_or_else(|| {
                ToolError::malformed(TOOL, format!("`days` must be at least 1, got {}", parsed.days))
            })?;

        let points: Vec<PricePoint> = self
            .providers()
            .price
            .get_historical_price(days)
            .await?
            .into_iter()
            .map(PricePoint::from)
            .collect();

        Ok(ToolOutput::new(json!({
            "data_points": points.len(),
            "period_days": days,
            "analysis": analyze_history(&points),
            "price_data": points,
        })))
    }

    pub async fn get_network_metrics(&self, input: Value) -> ToolResult {
        let _parsed: TimeframeInput = extract_input("get_network_metrics", input)?;

        let metrics = self.providers().network.get_network_metrics().await?;
        Ok(ToolOutput::new(json!({
            "analysis": analyze_network(&metrics),
            "network_metrics": metrics,
        })))
    }

    pub async fn analyze_fee_landscape(&self, input: Value) -> ToolResult {
        let _parsed: FeeLandscapeInput = extract_input("analyze_fee_landscape", input)?;

        let fees = self.providers().network.get_fee_estimates().await?;
        Ok(ToolOutput::new(json!({
            "recommendations": fee_recommendations(&fees),
            "analysis": analyze_fees(&fees),
            "current_fees": fees,
        })))
    }

    pub async fn analyze_mempool_state(&self, input: Value) -> ToolResult {
        let parsed: MempoolStateInput = extract_input("analyze_mempool_state", input)?;

        let mempool = self.providers().network.get_mempool_info().await?;
        let predictions = if parsed.include_predictions {
            json!(predict_mempool(&mempool))
        } else {
            Value::Null
        };
        Ok(ToolOutput::new(json!({
            "analysis": analyze_mempool(&mempool),
            "predictions": predictions,
            "mempool_state": mempool,
        })))
    }

    /// Fetches every address concurrently. A failed address contributes an
    /// empty set and a warning rather than failing the call.
    pub async fn analyze_utxo_distribution(&self, input: Value) -> ToolResult {
        const TOOL: &str = "analyze_utxo_distribution";
        let parsed: UtxoDistributionInput = extract_input(TOOL, input)?;

        let explorer = &self.providers().explorer;
        let fetches = parsed.address_list.iter().map(|address| async move {
            match path_segment(TOOL, "address_list", address) {
                Ok(address) => explorer
                    .get_address_utxos(address)
                    .await
                    .map_err(ToolError::from),
                Err(err) => Err(err),
            }
        });
        let results = join_all(fetches).await;

        let mut sets = Vec::with_capacity(results.len());
        let mut failed_addresses = Vec::new();
        let mut failure_messages = Vec::new();
        for (address, result) in parsed.address_list.iter().zip(results) {
            match result {
                Ok(utxos) => sets.push(utxos),
                Err(err) => {
                    failed_addresses.push(address.clone());
                    failure_messages.push(format!("{}: {}", address, err));
                    sets.push(Vec::new());
                }
            }
        }

        let report = summarize_distribution(&sets);
        let mut output = ToolOutput::new(json!({
            "addresses_analyzed": parsed.address_list.len(),
            "total_utxos": report.total_utxos,
            "failed_addresses": failed_addresses,
            "distribution_analysis": report.distribution_analysis,
            "privacy_analysis": report.privacy_analysis,
        }));

        if !failed_addresses.is_empty() {
            let partial = ToolError::PartialUpstreamFailure {
                operation: TOOL.to_string(),
                failed: failed_addresses.len(),
                total: parsed.address_list.len(),
            };
            output = output.with_warning(partial.to_string());
            for message in failure_messages {
                output = output.with_warning(message);
            }
        }
        Ok(output)
    }

    /// `depth = 0` answers without touching the explorer.
    pub async fn trace_coin_lineage(&self, input: Value) -> ToolResult {
        const TOOL: &str = "trace_coin_lineage";
        let parsed: TraceLineageInput = extract_input(TOOL, input)?;
        let txid = path_segment(TOOL, "txid", &parsed.txid)?;
        let output_index = u32::try_from(parsed.output_index).map_err(|_| {
            ToolError::malformed(
                TOOL,
                format!("`output_index` out of range: {}", parsed.output_index),
            )
        })?;
        let depth = u32::try_from(parsed.depth).unwrap_or(u32::MAX);

        let mut result = json!({
            "starting_point": { "txid": txid, "output_index": output_index },
            "trace_depth": depth,
            "lineage": [],
            "analysis": { "note": LINEAGE_NOTE },
        });

        if depth > 0 {
            let tx = self.providers().explorer.get_transaction(txid).await?;
            result["lineage"] = json!(trace_first_hop(&tx, output_index, depth));
        }

        Ok(ToolOutput::new(result))
    }

    pub async fn detect_transaction_patterns(&self, input: Value) -> ToolResult {
        const TOOL: &str = "detect_transaction_patterns";
        let parsed: DetectPatternsInput = extract_input(TOOL, input)?;
        let txid = path_segment(TOOL, "txid", &parsed.txid)?;

        let transaction = self.providers().explorer.get_transaction(txid).await?;
        let report = detect_patterns(&transaction);
        Ok(ToolOutput::new(json!({
            "transaction_id": txid,
            "detected_patterns": report.detected_patterns,
            "analysis": report.analysis,
        })))
    }
}
