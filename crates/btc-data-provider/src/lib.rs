//! Cached data providers.
//!
//! Each provider owns one [`TtlCache`] and one handle to the upstream seam:
//!
//! | Provider | Source | Cached operations |
//! |----------|--------|-------------------|
//! | [`ExplorerProvider`] | block explorer | block, tx, address (300s), UTXOs (60s) |
//! | [`PriceProvider`] | market index | spot price (300s), history (1800s) |
//! | [`NetworkProvider`] | mempool/fees | joined metrics (60s) |
//!
//! Address history pages, fee estimates and mempool info are always fetched
//! fresh.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use btc_data_provider::DataProviders;
//! use btc_transport::{Endpoints, HttpSource};
//!
//! let providers = DataProviders::new(Arc::new(HttpSource::from_env()), &Endpoints::from_env());
//! let block = providers.explorer.get_block("0").await?;
//! ```

pub mod cache;
pub mod error;
pub mod explorer;
mod fetch;
pub mod metrics;
pub mod network;
pub mod price;

use std::sync::Arc;

use btc_transport::{Endpoints, UpstreamSource};

pub use cache::TtlCache;
pub use error::{ProviderError, ProviderResult};
pub use explorer::ExplorerProvider;
pub use metrics::{CacheMetrics, CacheStats};
pub use network::NetworkProvider;
pub use price::PriceProvider;

/// The three providers, built once at startup and shared by handle.
pub struct DataProviders {
    pub explorer: ExplorerProvider,
    pub price: PriceProvider,
    pub network: NetworkProvider,
}

impl DataProviders {
    pub fn new(source: Arc<dyn UpstreamSource>, endpoints: &Endpoints) -> Self {
        Self {
            explorer: ExplorerProvider::new(source.clone(), &endpoints.explorer),
            price: PriceProvider::new(source.clone(), &endpoints.price),
            network: NetworkProvider::new(source, &endpoints.network),
        }
    }
}
