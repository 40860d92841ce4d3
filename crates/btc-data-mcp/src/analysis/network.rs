//! Congestion tiers, fee levels and mempool summaries.

use serde::{Deserialize, Serialize};

use btc_data_types::{FeeEstimates, MempoolInfo, NetworkMetrics};

use super::ratio;

/// Mempool transaction count above which congestion is "high".
pub const HIGH_CONGESTION_COUNT: u64 = 50_000;
/// Mempool transaction count above which congestion is "medium".
pub const MEDIUM_CONGESTION_COUNT: u64 = 20_000;
/// Rough transaction capacity used for `capacity_utilization`.
pub const MEMPOOL_CAPACITY_ESTIMATE: f64 = 300_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeEnvironment {
    Cheap,
    Moderate,
    Expensive,
}

pub fn classify_congestion(mempool_count: u64) -> CongestionLevel {
    if mempool_count > HIGH_CONGESTION_COUNT {
        CongestionLevel::High
    } else if mempool_count > MEDIUM_CONGESTION_COUNT {
        CongestionLevel::Medium
    } else {
        CongestionLevel::Low
    }
}

/// Tier of the next-block fee rate (sat/vB): above 100 is high, above 50 medium.
pub fn classify_fee_level(fastest_fee: f64) -> FeeLevel {
    if fastest_fee > 100.0 {
        FeeLevel::High
    } else if fastest_fee > 50.0 {
        FeeLevel::Medium
    } else {
        FeeLevel::Low
    }
}

fn classify_fee_environment(fastest_fee: f64) -> FeeEnvironment {
    match classify_fee_level(fastest_fee) {
        FeeLevel::High => FeeEnvironment::Expensive,
        FeeLevel::Medium => FeeEnvironment::Moderate,
        FeeLevel::Low => FeeEnvironment::Cheap,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAnalysis {
    pub network_congestion: CongestionLevel,
    pub fee_environment: FeeEnvironment,
    pub security_assessment: &'static str,
}

pub fn analyze_network(metrics: &NetworkMetrics) -> NetworkAnalysis {
    NetworkAnalysis {
        network_congestion: classify_congestion(metrics.mempool_size),
        fee_environment: classify_fee_environment(metrics.fee_estimates.fastest_fee),
        security_assessment: "high",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRecommendations {
    pub immediate: String,
    pub standard: String,
    pub economy: String,
}

pub fn fee_recommendations(fees: &FeeEstimates) -> FeeRecommendations {
    FeeRecommendations {
        immediate: format!("{} sat/vB for next block", fees.fastest_fee),
        standard: format!("{} sat/vB for 30 min confirmation", fees.half_hour_fee),
        economy: format!("{} sat/vB for 1 hour confirmation", fees.hour_fee),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeAnalysis {
    pub fee_level: FeeLevel,
    /// `fastest - hour`, in sat/vB.
    pub spread: f64,
    /// Spread as a percentage of the hour fee.
    pub priority_premium: f64,
}

pub fn analyze_fees(fees: &FeeEstimates) -> FeeAnalysis {
    let spread = fees.fastest_fee - fees.hour_fee;
    FeeAnalysis {
        fee_level: classify_fee_level(fees.fastest_fee),
        spread,
        priority_premium: ratio(spread, fees.hour_fee) * 100.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MempoolAnalysis {
    pub congestion_level: CongestionLevel,
    /// Total fees over total vsize, sat/vB.
    pub average_fee_rate: f64,
    /// `None` when the source does not report memory usage.
    pub memory_usage_mb: Option<f64>,
    pub capacity_utilization: f64,
}

pub fn analyze_mempool(info: &MempoolInfo) -> MempoolAnalysis {
    MempoolAnalysis {
        congestion_level: classify_congestion(info.count),
        average_fee_rate: ratio(info.total_fee, info.vsize as f64),
        memory_usage_mb: info.usage.map(|bytes| bytes as f64 / 1024.0 / 1024.0),
        capacity_utilization: info.count as f64 / MEMPOOL_CAPACITY_ESTIMATE * 100.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MempoolPredictions {
    pub likely_clear_time: &'static str,
    pub fee_trend: &'static str,
}

pub fn predict_mempool(info: &MempoolInfo) -> MempoolPredictions {
    let likely_clear_time = if info.count < 10_000 {
        "< 1 hour"
    } else if info.count < HIGH_CONGESTION_COUNT {
        "1-6 hours"
    } else {
        "> 6 hours"
    };
    MempoolPredictions {
        likely_clear_time,
        fee_trend: "stable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees(fastest: f64, half_hour: f64, hour: f64) -> FeeEstimates {
        FeeEstimates {
            fastest_fee: fastest,
            half_hour_fee: half_hour,
            hour_fee: hour,
            economy_fee: None,
            minimum_fee: None,
        }
    }

    fn mempool(count: u64) -> MempoolInfo {
        MempoolInfo {
            count,
            vsize: 2_000_000,
            total_fee: 10_000_000.0,
            usage: Some(104_857_600),
            fee_histogram: Vec::new(),
        }
    }

    #[test]
    fn fee_level_tiers() {
        assert_eq!(classify_fee_level(120.0), FeeLevel::High);
        assert_eq!(classify_fee_level(60.0), FeeLevel::Medium);
        assert_eq!(classify_fee_level(10.0), FeeLevel::Low);
        assert_eq!(classify_fee_level(100.0), FeeLevel::Medium);
        assert_eq!(classify_fee_level(50.0), FeeLevel::Low);
    }

    #[test]
    fn congestion_tiers_are_strictly_greater_than() {
        assert_eq!(classify_congestion(50_001), CongestionLevel::High);
        assert_eq!(classify_congestion(50_000), CongestionLevel::Medium);
        assert_eq!(classify_congestion(20_001), CongestionLevel::Medium);
        assert_eq!(classify_congestion(20_000), CongestionLevel::Low);
        assert_eq!(classify_congestion(0), CongestionLevel::Low);
    }

    #[test]
    fn fee_analysis_spread_and_premium() {
        let analysis = analyze_fees(&fees(30.0, 20.0, 10.0));
        assert_eq!(analysis.fee_level, FeeLevel::Low);
        assert_eq!(analysis.spread, 20.0);
        assert_eq!(analysis.priority_premium, 200.0);

        let zero_hour = analyze_fees(&fees(5.0, 0.0, 0.0));
        assert_eq!(zero_hour.priority_premium, 0.0);
    }

    #[test]
    fn recommendations_render_plain_numbers() {
        let recs = fee_recommendations(&fees(42.0, 30.0, 21.5));
        assert_eq!(recs.immediate, "42 sat/vB for next block");
        assert_eq!(recs.standard, "30 sat/vB for 30 min confirmation");
        assert_eq!(recs.economy, "21.5 sat/vB for 1 hour confirmation");
    }

    #[test]
    fn network_analysis_labels() {
        let metrics = NetworkMetrics {
            difficulty: 1.2,
            hashrate: 6.0e20,
            mempool_size: 60_000,
            fee_estimates: fees(120.0, 80.0, 40.0),
        };
        let analysis = analyze_network(&metrics);
        assert_eq!(analysis.network_congestion, CongestionLevel::High);
        assert_eq!(analysis.fee_environment, FeeEnvironment::Expensive);

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["network_congestion"], "high");
        assert_eq!(json["fee_environment"], "expensive");
        assert_eq!(json["security_assessment"], "high");
    }

    #[test]
    fn mempool_analysis_and_predictions() {
        let analysis = analyze_mempool(&mempool(30_000));
        assert_eq!(analysis.congestion_level, CongestionLevel::Medium);
        assert_eq!(analysis.average_fee_rate, 5.0);
        assert_eq!(analysis.memory_usage_mb, Some(100.0));
        assert_eq!(analysis.capacity_utilization, 10.0);

        assert_eq!(predict_mempool(&mempool(5_000)).likely_clear_time, "< 1 hour");
        assert_eq!(predict_mempool(&mempool(30_000)).likely_clear_time, "1-6 hours");
        assert_eq!(predict_mempool(&mempool(80_000)).likely_clear_time, "> 6 hours");
    }

    #[test]
    fn mempool_without_usage_or_vsize() {
        let mut info = mempool(0);
        info.usage = None;
        info.vsize = 0;
        let analysis = analyze_mempool(&info);
        assert_eq!(analysis.memory_usage_mb, None);
        assert_eq!(analysis.average_fee_rate, 0.0);
    }
}
