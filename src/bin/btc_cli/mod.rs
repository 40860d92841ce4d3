//! CLI subcommand implementations for btc-data

pub mod call;
pub mod serve;
pub mod tools;

use btc_data_mcp::DataConfig;

/// Upstream overrides shared by every subcommand that talks to the network.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct EndpointArgs {
    /// Block explorer base URL (default: BTC_EXPLORER_URL or blockstream.info)
    #[arg(long, global = true)]
    pub explorer_url: Option<String>,

    /// Market data base URL (default: BTC_PRICE_URL or CoinGecko)
    #[arg(long, global = true)]
    pub price_url: Option<String>,

    /// Mempool/fee service base URL (default: BTC_NETWORK_URL or mempool.space)
    #[arg(long, global = true)]
    pub network_url: Option<String>,
}

impl EndpointArgs {
    /// Environment configuration with any command-line overrides applied.
    pub fn config(&self) -> DataConfig {
        let mut config = DataConfig::from_env();
        config.endpoints = config.endpoints.with_overrides(
            self.explorer_url.as_deref(),
            self.price_url.as_deref(),
            self.network_url.as_deref(),
        );
        config
    }
}
