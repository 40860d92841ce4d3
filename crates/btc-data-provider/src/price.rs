//! Market-data provider (CoinGecko free tier). Single asset, USD only.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use btc_data_types::{MarketChart, SimplePrice};
use btc_transport::endpoints::normalize_base;
use btc_transport::UpstreamSource;

use crate::cache::TtlCache;
use crate::error::ProviderResult;
use crate::fetch::fetch_cached;
use crate::metrics::CacheStats;

pub const PRICE_TTL: Duration = Duration::from_secs(300);
/// Historical series are expensive to refetch and move slowly.
pub const HISTORY_TTL: Duration = Duration::from_secs(1800);

pub const DEFAULT_HISTORY_DAYS: u32 = 30;

const PRICE_KEY: &str = "btc:price";

pub struct PriceProvider {
    source: Arc<dyn UpstreamSource>,
    base_url: String,
    cache: TtlCache<Value>,
}

impl PriceProvider {
    pub fn new(source: Arc<dyn UpstreamSource>, base_url: &str) -> Self {
        Self {
            source,
            base_url: normalize_base(base_url),
            cache: TtlCache::new(PRICE_TTL),
        }
    }

    /// Spot price with 24h change, volume and market cap.
    pub async fn get_price(&self) -> ProviderResult<SimplePrice> {
        let url = format!(
            "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true&include_24hr_vol=true&include_market_cap=true",
            self.base_url
        );
        fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_price",
            PRICE_KEY.to_string(),
            &url,
            PRICE_TTL,
        )
        .await
    }

    /// `(timestamp_ms, usd)` pairs covering the last `days` days.
    pub async fn get_historical_price(&self, days: u32) -> ProviderResult<Vec<(u64, f64)>> {
        let url = format!(
            "{}/coins/bitcoin/market_chart?vs_currency=usd&days={}",
            self.base_url, days
        );
        let chart: MarketChart = fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_historical_price",
            format!("btc:history:{}", days),
            &url,
            HISTORY_TTL,
        )
        .await?;
        Ok(chart.prices)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
