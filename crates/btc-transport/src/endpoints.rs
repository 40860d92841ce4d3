use btc_data_types::env_string_or;

pub const DEFAULT_EXPLORER_URL: &str = "https://blockstream.info/api";
pub const DEFAULT_PRICE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_NETWORK_URL: &str = "https://mempool.space/api";

/// Base URLs of the three upstream sources, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub explorer: String,
    pub price: String,
    pub network: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            explorer: DEFAULT_EXPLORER_URL.to_string(),
            price: DEFAULT_PRICE_URL.to_string(),
            network: DEFAULT_NETWORK_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Defaults overridden by `BTC_EXPLORER_URL`, `BTC_PRICE_URL` and
    /// `BTC_NETWORK_URL`.
    pub fn from_env() -> Self {
        Self {
            explorer: normalize_base(&env_string_or("BTC_EXPLORER_URL", DEFAULT_EXPLORER_URL)),
            price: normalize_base(&env_string_or("BTC_PRICE_URL", DEFAULT_PRICE_URL)),
            network: normalize_base(&env_string_or("BTC_NETWORK_URL", DEFAULT_NETWORK_URL)),
        }
    }

    /// Replace any endpoint for which an override is given.
    pub fn with_overrides(
        mut self,
        explorer: Option<&str>,
        price: Option<&str>,
        network: Option<&str>,
    ) -> Self {
        if let Some(url) = explorer {
            self.explorer = normalize_base(url);
        }
        if let Some(url) = price {
            self.price = normalize_base(url);
        }
        if let Some(url) = network {
            self.network = normalize_base(url);
        }
        self
    }
}

pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        assert_eq!(
            normalize_base(" https://mempool.space/api/ "),
            "https://mempool.space/api"
        );
    }

    #[test]
    fn overrides_replace_only_given_endpoints() {
        let endpoints =
            Endpoints::default().with_overrides(Some("http://localhost:3000/"), None, None);
        assert_eq!(endpoints.explorer, "http://localhost:3000");
        assert_eq!(endpoints.price, DEFAULT_PRICE_URL);
        assert_eq!(endpoints.network, DEFAULT_NETWORK_URL);
    }
}
