//! Mempool/fee (mempool.space) response shapes and the joined network snapshot.

use serde::{Deserialize, Serialize};

/// `GET /v1/difficulty-adjustment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    pub difficulty_change: f64,
    #[serde(default)]
    pub progress_percent: Option<f64>,
    #[serde(default)]
    pub remaining_blocks: Option<u64>,
    #[serde(default)]
    pub estimated_retarget_date: Option<u64>,
}

/// `GET /v1/hashrate`, minus the historical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashrateSummary {
    pub current_hashrate: f64,
    #[serde(default)]
    pub current_difficulty: Option<f64>,
}

/// `GET /mempool`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolInfo {
    pub count: u64,
    pub vsize: u64,
    pub total_fee: f64,
    /// Bytes of memory used, when the source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<u64>,
    #[serde(default)]
    pub fee_histogram: Vec<(f64, f64)>,
}

/// `GET /v1/fees/recommended`, in sat/vB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimates {
    pub fastest_fee: f64,
    pub half_hour_fee: f64,
    pub hour_fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_fee: Option<f64>,
}

/// Join of the four network calls. Only ever built with all four present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    /// Percent change of the upcoming difficulty adjustment.
    pub difficulty: f64,
    pub hashrate: f64,
    pub mempool_size: u64,
    pub fee_estimates: FeeEstimates,
}

impl NetworkMetrics {
    pub fn from_parts(
        difficulty: DifficultyAdjustment,
        hashrate: HashrateSummary,
        mempool: MempoolInfo,
        fee_estimates: FeeEstimates,
    ) -> Self {
        Self {
            difficulty: difficulty.difficulty_change,
            hashrate: hashrate.current_hashrate,
            mempool_size: mempool.count,
            fee_estimates,
        }
    }
}
