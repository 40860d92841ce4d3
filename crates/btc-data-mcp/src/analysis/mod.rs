//! Derived-analysis transforms.
//!
//! Every function here is pure: it takes a raw provider result and returns a
//! small derived-metrics record. None of them touch the network, so they are
//! tested directly against hand-built values.
//!
//! Ratios never produce NaN or infinity; a zero denominator yields `0.0` so
//! every result serializes as plain JSON numbers.

pub mod chain;
pub mod market;
pub mod network;

pub use chain::{
    analyze_address, analyze_block, analyze_transaction, derive_balance, detect_patterns,
    summarize_distribution, summarize_utxos, trace_first_hop, AddressAnalysis, Balance,
    BlockAnalysis, DistributionAnalysis, DistributionReport, LineageEntry, PatternAnalysis,
    PatternConfidence, PatternReport, PrivacyAnalysis, TransactionAnalysis, TxPattern,
    UtxoSummary, DUST_THRESHOLD_SATS, LINEAGE_NOTE,
};
pub use market::{analyze_history, analyze_price, HistoryAnalysis, PriceAnalysis, PriceTrend};
pub use network::{
    analyze_fees, analyze_mempool, analyze_network, classify_congestion, classify_fee_level,
    fee_recommendations, predict_mempool, CongestionLevel, FeeAnalysis, FeeEnvironment, FeeLevel,
    FeeRecommendations, MempoolAnalysis, MempoolPredictions, NetworkAnalysis,
};

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
