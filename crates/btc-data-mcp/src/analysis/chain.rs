//! Block, transaction, address and UTXO derivations.

use serde::{Deserialize, Serialize};

use btc_data_types::{AddressInfo, Block, Transaction, Utxo};

use super::ratio;

/// Outputs below this many satoshis count as dust.
pub const DUST_THRESHOLD_SATS: u64 = 546;

/// More UTXOs than this across the analyzed addresses flags consolidation.
const CONSOLIDATION_UTXO_COUNT: usize = 20;

pub const LINEAGE_NOTE: &str =
    "Basic lineage tracing implemented. Full graph analysis requires additional data sources.";

const PATTERN_NOTE: &str =
    "Basic pattern detection. Advanced analysis requires additional data sources.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockAnalysis {
    pub size_efficiency: f64,
    pub transaction_density: f64,
    pub avg_transaction_size: f64,
}

pub fn analyze_block(block: &Block) -> BlockAnalysis {
    let size = block.size as f64;
    let tx_count = block.tx_count as f64;
    BlockAnalysis {
        size_efficiency: ratio(block.weight as f64, size),
        transaction_density: ratio(tx_count, size),
        avg_transaction_size: ratio(size, tx_count),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionAnalysis {
    pub input_count: usize,
    pub output_count: usize,
    pub total_input_value: u64,
    pub total_output_value: u64,
    /// Fee over raw size, sat/byte.
    pub fee_rate: f64,
    pub is_confirmed: bool,
    pub block_height: Option<u64>,
}

pub fn analyze_transaction(tx: &Transaction) -> TransactionAnalysis {
    TransactionAnalysis {
        input_count: tx.vin.len(),
        output_count: tx.vout.len(),
        total_input_value: tx.total_input_value(),
        total_output_value: tx.total_output_value(),
        fee_rate: ratio(tx.fee as f64, tx.size as f64),
        is_confirmed: tx.status.confirmed,
        block_height: tx.status.block_height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub confirmed: i64,
    pub unconfirmed: i64,
    pub total: i64,
}

pub fn derive_balance(info: &AddressInfo) -> Balance {
    let confirmed = info.chain_stats.balance();
    let unconfirmed = info.mempool_stats.balance();
    Balance {
        confirmed,
        unconfirmed,
        total: confirmed + unconfirmed,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressAnalysis {
    pub transaction_count: u64,
    pub avg_transaction_value: f64,
    pub utxo_efficiency: f64,
}

pub fn analyze_address(info: &AddressInfo, utxo_count: usize) -> AddressAnalysis {
    let confirmed = info.chain_stats.balance() as f64;
    let tx_count = info.chain_stats.tx_count;
    AddressAnalysis {
        transaction_count: tx_count,
        avg_transaction_value: confirmed / tx_count.max(1) as f64,
        utxo_efficiency: ratio(confirmed, utxo_count as f64),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtxoSummary {
    pub count: usize,
    pub total_value: u64,
    pub average_value: f64,
    pub largest_utxo: u64,
    pub smallest_utxo: u64,
}

pub fn summarize_utxos(utxos: &[Utxo]) -> UtxoSummary {
    let total_value: u64 = utxos.iter().map(|u| u.value).sum();
    UtxoSummary {
        count: utxos.len(),
        total_value,
        average_value: total_value as f64 / utxos.len().max(1) as f64,
        largest_utxo: utxos.iter().map(|u| u.value).max().unwrap_or(0),
        smallest_utxo: utxos.iter().map(|u| u.value).min().unwrap_or(0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionAnalysis {
    pub total_value: u64,
    pub average_utxo_value: f64,
    pub largest_utxo: u64,
    pub smallest_utxo: u64,
    pub dust_utxos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivacyAnalysis {
    pub utxo_consolidation_opportunity: &'static str,
    /// Dust UTXOs as a percentage of all UTXOs.
    pub dust_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    pub total_utxos: usize,
    pub distribution_analysis: DistributionAnalysis,
    pub privacy_analysis: PrivacyAnalysis,
}

/// Summarize UTXO sets fetched for several addresses as one pool.
pub fn summarize_distribution(per_address: &[Vec<Utxo>]) -> DistributionReport {
    let values: Vec<u64> = per_address
        .iter()
        .flat_map(|set| set.iter().map(|u| u.value))
        .collect();
    let total_value: u64 = values.iter().sum();
    let dust_utxos = values
        .iter()
        .filter(|&&value| value < DUST_THRESHOLD_SATS)
        .count();

    DistributionReport {
        total_utxos: values.len(),
        distribution_analysis: DistributionAnalysis {
            total_value,
            average_utxo_value: ratio(total_value as f64, values.len() as f64),
            largest_utxo: values.iter().copied().max().unwrap_or(0),
            smallest_utxo: values.iter().copied().min().unwrap_or(0),
            dust_utxos,
        },
        privacy_analysis: PrivacyAnalysis {
            utxo_consolidation_opportunity: if values.len() > CONSOLIDATION_UTXO_COUNT {
                "high"
            } else {
                "low"
            },
            dust_ratio: ratio(dust_utxos as f64, values.len() as f64) * 100.0,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageEntry {
    pub level: u32,
    pub txid: String,
    pub output_index: u32,
    pub value: u64,
    pub address: Option<String>,
    pub script_type: String,
}

/// Resolve the starting output of a lineage trace.
///
/// Only the first hop is available: following the output forward needs a
/// spend index the explorer does not expose, so at most one entry comes
/// back regardless of `depth`. `depth == 0` and an out-of-range
/// `output_index` both yield nothing.
pub fn trace_first_hop(tx: &Transaction, output_index: u32, depth: u32) -> Vec<LineageEntry> {
    if depth == 0 {
        return Vec::new();
    }
    tx.vout
        .get(output_index as usize)
        .map(|output| LineageEntry {
            level: 0,
            txid: tx.txid.clone(),
            output_index,
            value: output.value,
            address: output.scriptpubkey_address.clone(),
            script_type: output.scriptpubkey_type.clone(),
        })
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxPattern {
    SimplePayment,
    BatchPayment,
    Consolidation,
    RoundAmounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternConfidence {
    Low,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAnalysis {
    pub input_count: usize,
    pub output_count: usize,
    pub total_value: u64,
    pub fee_rate: f64,
    pub pattern_confidence: PatternConfidence,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternReport {
    pub detected_patterns: Vec<TxPattern>,
    pub analysis: PatternAnalysis,
}

pub fn detect_patterns(tx: &Transaction) -> PatternReport {
    let inputs = tx.vin.len();
    let outputs = tx.vout.len();

    let mut detected_patterns = Vec::new();
    if inputs == 1 && outputs == 2 {
        detected_patterns.push(TxPattern::SimplePayment);
    }
    if outputs > 10 {
        detected_patterns.push(TxPattern::BatchPayment);
    }
    if inputs > 5 {
        detected_patterns.push(TxPattern::Consolidation);
    }
    // Any whole multiple of 0.1 BTC, which includes whole bitcoins.
    if tx.vout.iter().any(|output| output.value % 10_000_000 == 0) {
        detected_patterns.push(TxPattern::RoundAmounts);
    }

    let pattern_confidence = if detected_patterns.is_empty() {
        PatternConfidence::Low
    } else {
        PatternConfidence::Medium
    };

    PatternReport {
        analysis: PatternAnalysis {
            input_count: inputs,
            output_count: outputs,
            total_value: tx.total_output_value(),
            fee_rate: ratio(tx.fee as f64, tx.size as f64),
            pattern_confidence,
            note: PATTERN_NOTE,
        },
        detected_patterns,
    }
}
