//! Shared types for the btc-data workspace.
//!
//! These are the response shapes of the three upstream sources, kept as plain
//! value objects. Nothing here mutates after deserialization.
//!
//! - [`explorer`]: blocks, transactions, address stats and UTXOs
//! - [`market`]: spot price and historical price series
//! - [`network`]: difficulty, hashrate, mempool and fee estimates

pub mod env_utils;
pub mod explorer;
pub mod market;
pub mod network;

pub use env_utils::{env_bool_or, env_string_or, env_var, env_var_or};
pub use explorer::{
    AddressInfo, AddressStats, Block, Transaction, TxInput, TxOutput, TxStatus, Utxo,
};
pub use market::{BitcoinPrice, MarketChart, PricePoint, SimplePrice};
pub use network::{
    DifficultyAdjustment, FeeEstimates, HashrateSummary, MempoolInfo, NetworkMetrics,
};
