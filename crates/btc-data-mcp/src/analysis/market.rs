//! Price trend and historical series summaries.

use serde::{Deserialize, Serialize};

use btc_data_types::{BitcoinPrice, PricePoint};

use super::ratio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAnalysis {
    pub price_trend: PriceTrend,
    /// Absolute 24h change, percent.
    pub volatility_indicator: f64,
    pub market_cap_rank: u32,
    pub volume_to_market_cap_ratio: f64,
}

pub fn analyze_price(price: &BitcoinPrice) -> PriceAnalysis {
    PriceAnalysis {
        price_trend: if price.usd_24h_change > 0.0 {
            PriceTrend::Bullish
        } else {
            PriceTrend::Bearish
        },
        volatility_indicator: price.usd_24h_change.abs(),
        market_cap_rank: 1,
        volume_to_market_cap_ratio: ratio(price.usd_24h_vol, price.usd_market_cap),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryAnalysis {
    /// First-to-last change, percent.
    pub period_return: f64,
    pub highest_price: Option<f64>,
    pub lowest_price: Option<f64>,
    pub average_price: Option<f64>,
}

pub fn analyze_history(points: &[PricePoint]) -> HistoryAnalysis {
    let first = points.first().map(|p| p.price).unwrap_or(0.0);
    let last = points.last().map(|p| p.price).unwrap_or(0.0);

    let highest_price = points.iter().map(|p| p.price).reduce(f64::max);
    let lowest_price = points.iter().map(|p| p.price).reduce(f64::min);
    let average_price = if points.is_empty() {
        None
    } else {
        Some(points.iter().map(|p| p.price).sum::<f64>() / points.len() as f64)
    };

    HistoryAnalysis {
        period_return: ratio(last - first, first) * 100.0,
        highest_price,
        lowest_price,
        average_price,
    }
}
