//! Blockchain client module for AIBlock storage and mempool nodes.
//!
//! [`BlockchainClient`] is the seam the query adapters call through; the
//! adapters never assume anything about the shape a call returns.
//! [`AiBlockClient`] is the HTTP implementation used by the server.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::blockchain::models::SdkValue;
use crate::config::Config;

/// Read-only node calls used by the query adapters.
#[async_trait]
pub trait BlockchainClient: Send + Sync {
    async fn get_latest_block(&self) -> Result<SdkValue>;

    async fn get_block_by_num(&self, block_num: u64) -> Result<SdkValue>;

    async fn get_blockchain_entry(&self, hash: &str) -> Result<SdkValue>;

    async fn get_transaction_by_hash(&self, tx_hash: &str) -> Result<SdkValue>;

    async fn fetch_transactions(&self, tx_hashes: &[String]) -> Result<SdkValue>;

    async fn get_total_supply(&self) -> Result<SdkValue>;

    async fn get_issued_supply(&self) -> Result<SdkValue>;

    async fn get_balance_for_address(&self, address: &str) -> Result<SdkValue>;

    async fn fetch_balance(&self, addresses: &[String]) -> Result<SdkValue>;
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Storage,
    Mempool,
}

/// HTTP client for AIBlock storage and mempool nodes.
#[derive(Clone, Debug)]
pub struct AiBlockClient {
    http: Client,
    storage_host: Option<String>,
    mempool_host: Option<String>,
}

impl AiBlockClient {
    pub fn new(config: &Config) -> Self {
        Self::with_hosts(config.storage_host.clone(), config.mempool_host.clone())
    }

    pub fn with_hosts(storage_host: Option<String>, mempool_host: Option<String>) -> Self {
        Self {
            http: Client::new(),
            storage_host,
            mempool_host,
        }
    }

    // Hosts are parsed per call so a misconfigured node fails the call, not startup.
    fn endpoint(&self, node: Node, route: &str) -> Result<Url> {
        let (var, host) = match node {
            Node::Storage => ("AIBLOCK_STORAGE_HOST", self.storage_host.as_deref()),
            Node::Mempool => ("AIBLOCK_MEMPOOL_HOST", self.mempool_host.as_deref()),
        };
        let host = host.ok_or_else(|| anyhow!("{} is not configured", var))?;
        let base = Url::parse(&format!("{}/", host.trim_end_matches('/')))
            .with_context(|| format!("{} is not a valid URL", var))?;
        base.join(route)
            .with_context(|| format!("Failed to build URL for route '{}'", route))
    }

    async fn call(
        &self,
        node: Node,
        method: Method,
        route: &str,
        body: Option<Value>,
    ) -> Result<SdkValue> {
        let url = self.endpoint(node, route)?;
        let request_id = uuid::Uuid::new_v4().to_string();
        debug!("{} {} (x-request-id {})", method, url, request_id);

        let mut req = self
            .http
            .request(method, url.clone())
            .header("x-request-id", &request_id);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow!("{} returned {}: {}", url, status, text));
        }
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON from {}", url))?;
        Ok(SdkValue::Json(value))
    }
}

#[async_trait]
impl BlockchainClient for AiBlockClient {
    async fn get_latest_block(&self) -> Result<SdkValue> {
        self.call(Node::Storage, Method::GET, "latest_block", None)
            .await
    }

    async fn get_block_by_num(&self, block_num: u64) -> Result<SdkValue> {
        self.call(Node::Storage, Method::POST, "block_by_num", Some(json!([block_num])))
            .await
    }

    async fn get_blockchain_entry(&self, hash: &str) -> Result<SdkValue> {
        self.call(Node::Storage, Method::POST, "blockchain_entry", Some(json!([hash])))
            .await
    }

    async fn get_transaction_by_hash(&self, tx_hash: &str) -> Result<SdkValue> {
        // Transactions are ledger entries keyed by their hash.
        self.get_blockchain_entry(tx_hash).await
    }

    async fn fetch_transactions(&self, tx_hashes: &[String]) -> Result<SdkValue> {
        self.call(
            Node::Storage,
            Method::POST,
            "transactions_by_key",
            Some(json!(tx_hashes)),
        )
        .await
    }

    async fn get_total_supply(&self) -> Result<SdkValue> {
        self.call(Node::Mempool, Method::GET, "total_supply", None)
            .await
    }

    async fn get_issued_supply(&self) -> Result<SdkValue> {
        self.call(Node::Mempool, Method::GET, "issued_supply", None)
            .await
    }

    async fn get_balance_for_address(&self, address: &str) -> Result<SdkValue> {
        self.fetch_balance(&[address.to_string()]).await
    }

    async fn fetch_balance(&self, addresses: &[String]) -> Result<SdkValue> {
        self.call(
            Node::Mempool,
            Method::POST,
            "fetch_balance",
            Some(json!({ "address_list": addresses })),
        )
        .await
    }
}
