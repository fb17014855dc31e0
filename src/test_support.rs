//! In-memory stand-ins for the node and wallet clients.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::blockchain::{
    client::BlockchainClient, models::SdkValue, wallet_manager::WalletClient,
};

fn canned(slot: &Option<SdkValue>, call: &str) -> Result<SdkValue> {
    slot.clone()
        .ok_or_else(|| anyhow!("no response configured for {}", call))
}

#[derive(Default)]
pub struct FakeChain {
    latest: Option<SdkValue>,
    block: Option<SdkValue>,
    entry: Option<SdkValue>,
    transactions: Option<SdkValue>,
    total_supply: Option<SdkValue>,
    issued_supply: Option<SdkValue>,
    balance: Option<SdkValue>,
    last_address: Mutex<Option<String>>,
}

impl FakeChain {
    pub fn with_latest(mut self, v: SdkValue) -> Self {
        self.latest = Some(v);
        self
    }

    pub fn with_block(mut self, v: SdkValue) -> Self {
        self.block = Some(v);
        self
    }

    pub fn with_entry(mut self, v: SdkValue) -> Self {
        self.entry = Some(v);
        self
    }

    pub fn with_transactions(mut self, v: SdkValue) -> Self {
        self.transactions = Some(v);
        self
    }

    pub fn with_total_supply(mut self, v: SdkValue) -> Self {
        self.total_supply = Some(v);
        self
    }

    pub fn with_issued_supply(mut self, v: SdkValue) -> Self {
        self.issued_supply = Some(v);
        self
    }

    pub fn with_balance(mut self, v: SdkValue) -> Self {
        self.balance = Some(v);
        self
    }

    pub fn last_address(&self) -> Option<String> {
        self.last_address.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockchainClient for FakeChain {
    async fn get_latest_block(&self) -> Result<SdkValue> {
        canned(&self.latest, "get_latest_block")
    }

    async fn get_block_by_num(&self, _block_num: u64) -> Result<SdkValue> {
        canned(&self.block, "get_block_by_num")
    }

    async fn get_blockchain_entry(&self, _hash: &str) -> Result<SdkValue> {
        canned(&self.entry, "get_blockchain_entry")
    }

    async fn get_transaction_by_hash(&self, _tx_hash: &str) -> Result<SdkValue> {
        canned(&self.entry, "get_transaction_by_hash")
    }

    async fn fetch_transactions(&self, _tx_hashes: &[String]) -> Result<SdkValue> {
        canned(&self.transactions, "fetch_transactions")
    }

    async fn get_total_supply(&self) -> Result<SdkValue> {
        canned(&self.total_supply, "get_total_supply")
    }

    async fn get_issued_supply(&self) -> Result<SdkValue> {
        canned(&self.issued_supply, "get_issued_supply")
    }

    async fn get_balance_for_address(&self, address: &str) -> Result<SdkValue> {
        *self.last_address.lock().unwrap() = Some(address.to_string());
        canned(&self.balance, "get_balance_for_address")
    }

    async fn fetch_balance(&self, _addresses: &[String]) -> Result<SdkValue> {
        canned(&self.balance, "fetch_balance")
    }
}

#[derive(Default)]
pub struct FakeWallet {
    keypair: Option<SdkValue>,
    balance: Option<SdkValue>,
    requested: Mutex<Option<Vec<String>>>,
}

impl FakeWallet {
    pub fn seed_phrase(&self) -> &'static str {
        "abandon ability able about above absent absorb abstract absurd abuse access accident"
    }

    pub fn with_keypair(mut self, v: SdkValue) -> Self {
        self.keypair = Some(v);
        self
    }

    pub fn with_balance(mut self, v: SdkValue) -> Self {
        self.balance = Some(v);
        self
    }

    /// Addresses passed to the last balance call.
    pub fn requested(&self) -> Option<Vec<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletClient for FakeWallet {
    fn generate_seed_phrase(&self) -> Result<String> {
        Ok(self.seed_phrase().to_string())
    }

    fn generate_keypair(&self) -> Result<SdkValue> {
        canned(&self.keypair, "generate_keypair")
    }

    async fn get_balance(&self, address: &str) -> Result<SdkValue> {
        *self.requested.lock().unwrap() = Some(vec![address.to_string()]);
        canned(&self.balance, "get_balance")
    }

    async fn fetch_balance(&self, addresses: &[String]) -> Result<SdkValue> {
        *self.requested.lock().unwrap() = Some(addresses.to_vec());
        canned(&self.balance, "fetch_balance")
    }
}
