//! Block explorer provider (Esplora REST API).

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use btc_data_types::{AddressInfo, Block, Transaction, Utxo};
use btc_transport::endpoints::normalize_base;
use btc_transport::UpstreamSource;

use crate::cache::TtlCache;
use crate::error::ProviderResult;
use crate::fetch::{fetch, fetch_cached};
use crate::metrics::CacheStats;

/// TTL for blocks, transactions and address stats.
pub const BLOCK_TTL: Duration = Duration::from_secs(300);
/// UTXO sets go stale faster than anything else on the explorer.
pub const UTXO_TTL: Duration = Duration::from_secs(60);

pub struct ExplorerProvider {
    source: Arc<dyn UpstreamSource>,
    base_url: String,
    cache: TtlCache<Value>,
}

impl ExplorerProvider {
    pub fn new(source: Arc<dyn UpstreamSource>, base_url: &str) -> Self {
        Self {
            source,
            base_url: normalize_base(base_url),
            cache: TtlCache::new(BLOCK_TTL),
        }
    }

    /// `hash_or_height` is passed through to `/block/{id}` as given.
    pub async fn get_block(&self, hash_or_height: &str) -> ProviderResult<Block> {
        let url = format!("{}/block/{}", self.base_url, hash_or_height);
        fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_block",
            format!("block:{}", hash_or_height),
            &url,
            BLOCK_TTL,
        )
        .await
    }

    pub async fn get_transaction(&self, txid: &str) -> ProviderResult<Transaction> {
        let url = format!("{}/tx/{}", self.base_url, txid);
        fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_transaction",
            format!("tx:{}", txid),
            &url,
            BLOCK_TTL,
        )
        .await
    }

    pub async fn get_address(&self, address: &str) -> ProviderResult<AddressInfo> {
        let url = format!("{}/address/{}", self.base_url, address);
        fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_address",
            format!("addr:{}", address),
            &url,
            BLOCK_TTL,
        )
        .await
    }

    pub async fn get_address_utxos(&self, address: &str) -> ProviderResult<Vec<Utxo>> {
        let url = format!("{}/address/{}/utxo", self.base_url, address);
        fetch_cached(
            self.source.as_ref(),
            &self.cache,
            "get_address_utxos",
            format!("utxos:{}", address),
            &url,
            UTXO_TTL,
        )
        .await
    }

    /// One page of confirmed/mempool history, newest first. With
    /// `last_seen_txid` the page continues after that transaction.
    ///
    /// Never cached: a cached first page would hand stale cursors to the
    /// next call in a pagination chain.
    pub async fn get_address_transactions(
        &self,
        address: &str,
        last_seen_txid: Option<&str>,
    ) -> ProviderResult<Vec<Transaction>> {
        let url = match last_seen_txid {
            Some(txid) => format!("{}/address/{}/txs/chain/{}", self.base_url, address, txid),
            None => format!("{}/address/{}/txs", self.base_url, address),
        };
        fetch(self.source.as_ref(), "get_address_transactions", &url).await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
