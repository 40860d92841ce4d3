//! Market-data (CoinGecko) response shapes.

use serde::{Deserialize, Serialize};

/// USD quote block of `GET /simple/price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinPrice {
    pub usd: f64,
    pub usd_24h_change: f64,
    pub usd_24h_vol: f64,
    pub usd_market_cap: f64,
}

/// `GET /simple/price?ids=bitcoin&...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePrice {
    pub bitcoin: BitcoinPrice,
}

/// `GET /coins/bitcoin/market_chart`; only the price series is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    /// `[timestamp_ms, price_usd]` pairs, oldest first.
    pub prices: Vec<(u64, f64)>,
}

/// One point of a historical series as presented to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: u64,
    pub price: f64,
}

impl From<(u64, f64)> for PricePoint {
    fn from((timestamp, price): (u64, f64)) -> Self {
        Self { timestamp, price }
    }
}
