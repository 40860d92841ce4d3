//! Mempool/fee provider (mempool.space REST API).

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use btc_data_types::{
    DifficultyAdjustment, FeeEstimates, HashrateSummary, MempoolInfo, NetworkMetrics,
};
use btc_transport::endpoints::normalize_base;
use btc_transport::UpstreamSource;

use crate::cache::TtlCache;
use crate::error::ProviderResult;
use crate::fetch::fetch;
use crate::metrics::CacheStats;

pub const NETWORK_TTL: Duration = Duration::from_secs(60);

const METRICS_KEY: &str = "network:metrics";
const METRICS_OP: &str = "get_network_metrics";

pub struct NetworkProvider {
    source: Arc<dyn UpstreamSource>,
    base_url: String,
    /// Holds the joined aggregate already decoded.
    cache: TtlCache<NetworkMetrics>,
}

impl NetworkProvider {
    pub fn new(source: Arc<dyn UpstreamSource>, base_url: &str) -> Self {
        Self {
            source,
            base_url: normalize_base(base_url),
            cache: TtlCache::new(NETWORK_TTL),
        }
    }

    /// Difficulty adjustment, hashrate, mempool size and fee estimates,
    /// fetched concurrently and joined.
    ///
    /// All four must succeed. On the first failure the whole aggregate fails
    /// and nothing is cached.
    pub async fn get_network_metrics(&self) -> ProviderResult<NetworkMetrics> {
        if let Some(metrics) = self.cache.get(METRICS_KEY) {
            debug!(key = METRICS_KEY, "cache hit");
            return Ok(metrics);
        }

        let source = self.source.as_ref();
        let difficulty_url = format!("{}/v1/difficulty-adjustment", self.base_url);
        let hashrate_url = format!("{}/v1/hashrate", self.base_url);
        let mempool_url = format!("{}/mempool", self.base_url);
        let fees_url = format!("{}/v1/fees/recommended", self.base_url);

        let (difficulty, hashrate, mempool, fees) = tokio::try_join!(
            fetch::<DifficultyAdjustment>(source, METRICS_OP, &difficulty_url),
            fetch::<HashrateSummary>(source, METRICS_OP, &hashrate_url),
            fetch::<MempoolInfo>(source, METRICS_OP, &mempool_url),
            fetch::<FeeEstimates>(source, METRICS_OP, &fees_url),
        )?;

        let metrics = NetworkMetrics::from_parts(difficulty, hashrate, mempool, fees);
        self.cache.set_with_ttl(METRICS_KEY, metrics.clone(), NETWORK_TTL);
        Ok(metrics)
    }

    /// Uncached; the fee-analysis tool wants the freshest numbers.
    pub async fn get_fee_estimates(&self) -> ProviderResult<FeeEstimates> {
        let url = format!("{}/v1/fees/recommended", self.base_url);
        fetch(self.source.as_ref(), "get_fee_estimates", &url).await
    }

    /// Uncached, for the same reason as [`Self::get_fee_estimates`].
    pub async fn get_mempool_info(&self) -> ProviderResult<MempoolInfo> {
        let url = format!("{}/mempool", self.base_url);
        fetch(self.source.as_ref(), "get_mempool_info", &url).await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
