//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use aiblock_mcp_server::{
    blockchain::{BlockchainClient, SdkObject, SdkValue, WalletClient},
    config::Config,
    AppState,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{json, Value};

/// Answers each client call with a canned value keyed by the call name.
#[derive(Default, Clone)]
pub struct StubNode {
    replies: HashMap<&'static str, SdkValue>,
}

impl StubNode {
    pub fn reply(mut self, call: &'static str, value: impl Into<SdkValue>) -> Self {
        self.replies.insert(call, value.into());
        self
    }

    fn get(&self, call: &str) -> Result<SdkValue> {
        self.replies
            .get(call)
            .cloned()
            .ok_or_else(|| anyhow!("node unreachable: {}", call))
    }
}

#[async_trait]
impl BlockchainClient for StubNode {
    async fn get_latest_block(&self) -> Result<SdkValue> {
        self.get("latest_block")
    }

    async fn get_block_by_num(&self, _block_num: u64) -> Result<SdkValue> {
        self.get("block_by_num")
    }

    async fn get_blockchain_entry(&self, _hash: &str) -> Result<SdkValue> {
        self.get("blockchain_entry")
    }

    async fn get_transaction_by_hash(&self, _tx_hash: &str) -> Result<SdkValue> {
        self.get("blockchain_entry")
    }

    async fn fetch_transactions(&self, _tx_hashes: &[String]) -> Result<SdkValue> {
        self.get("transactions_by_key")
    }

    async fn get_total_supply(&self) -> Result<SdkValue> {
        self.get("total_supply")
    }

    async fn get_issued_supply(&self) -> Result<SdkValue> {
        self.get("issued_supply")
    }

    async fn get_balance_for_address(&self, _address: &str) -> Result<SdkValue> {
        self.get("fetch_balance")
    }

    async fn fetch_balance(&self, _addresses: &[String]) -> Result<SdkValue> {
        self.get("fetch_balance")
    }
}

#[async_trait]
impl WalletClient for StubNode {
    fn generate_seed_phrase(&self) -> Result<String> {
        Ok("legal winner thank year wave sausage worth useful legal winner thank yellow".to_string())
    }

    fn generate_keypair(&self) -> Result<SdkValue> {
        Ok(SdkObject::new()
            .with("address", json!("9f86d081884c7d65"))
            .with("public_key", SdkValue::Bytes(vec![0x02, 0x1a, 0x2b]))
            .into())
    }

    async fn get_balance(&self, _address: &str) -> Result<SdkValue> {
        self.get("fetch_balance")
    }

    async fn fetch_balance(&self, _addresses: &[String]) -> Result<SdkValue> {
        self.get("fetch_balance")
    }
}

pub fn wallet_config() -> Config {
    Config {
        passphrase: SecretString::new("correct horse".to_string()),
        storage_host: Some("http://127.0.0.1:3001".to_string()),
        mempool_host: Some("http://127.0.0.1:3003".to_string()),
        wallet_address: Some("a1b2c3".to_string()),
        ..Config::default()
    }
}

pub fn state(config: Config, node: StubNode) -> AppState {
    let node = Arc::new(node);
    AppState::with_clients(config, node.clone(), node)
}

pub fn header() -> Value {
    json!({
        "version": 2,
        "bits": 0,
        "nonce_and_mining_tx_hash": [[12, 34], "g5d2e1"],
        "b_num": 4021,
        "timestamp": 1735689600,
        "difficulty": [],
        "seed_value": [1, 2, 3],
        "previous_hash": "b0ef5a",
        "txs_merkle_root_and_hash": ["", "c4d5"]
    })
}
