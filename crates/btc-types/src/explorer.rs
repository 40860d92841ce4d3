//! Block explorer (Esplora REST) response shapes.

use serde::{Deserialize, Serialize};

/// `GET /block/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub height: u64,
    pub version: u32,
    pub timestamp: u64,
    pub tx_count: u64,
    pub size: u64,
    /// Assumed `>= size`; not validated.
    pub weight: u64,
    pub merkle_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previousblockhash: Option<String>,
    pub nonce: u64,
    pub bits: u64,
    pub difficulty: f64,
}

/// Confirmation status shared by transactions and UTXOs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time: Option<u64>,
}

/// A transaction output. `value` is in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub scriptpubkey: String,
    #[serde(default)]
    pub scriptpubkey_asm: String,
    #[serde(default)]
    pub scriptpubkey_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scriptpubkey_address: Option<String>,
    pub value: u64,
}

/// A transaction input. Coinbase inputs carry no `prevout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub txid: String,
    pub vout: u32,
    #[serde(default)]
    pub prevout: Option<TxOutput>,
    #[serde(default)]
    pub is_coinbase: bool,
}

/// `GET /tx/:txid`, also the element type of `/address/:addr/txs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub locktime: u32,
    pub size: u64,
    pub weight: u64,
    pub fee: u64,
    pub status: TxStatus,
    pub vin: Vec<TxInput>,
    pub vout: Vec<TxOutput>,
}

impl Transaction {
    /// Sum of the previous-output values; inputs without a prevout count as 0.
    pub fn total_input_value(&self) -> u64 {
        self.vin
            .iter()
            .map(|input| input.prevout.as_ref().map(|p| p.value).unwrap_or(0))
            .sum()
    }

    pub fn total_output_value(&self) -> u64 {
        self.vout.iter().map(|output| output.value).sum()
    }
}

/// Funded/spent statistics for one side (chain or mempool) of an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressStats {
    pub funded_txo_count: u64,
    pub funded_txo_sum: u64,
    pub spent_txo_count: u64,
    pub spent_txo_sum: u64,
    pub tx_count: u64,
}

impl AddressStats {
    /// `funded_txo_sum - spent_txo_sum`. Signed because mempool stats can
    /// spend more than they fund.
    pub fn balance(&self) -> i64 {
        self.funded_txo_sum as i64 - self.spent_txo_sum as i64
    }
}

/// `GET /address/:addr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: String,
    pub chain_stats: AddressStats,
    pub mempool_stats: AddressStats,
}

/// Element of `GET /address/:addr/utxo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub status: TxStatus,
    pub value: u64,
}
