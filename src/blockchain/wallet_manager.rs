use anyhow::{Context, Result};
use async_trait::async_trait;
use bip39::{Language, Mnemonic};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::{rngs::OsRng, RngCore};
use sha3::{Digest, Sha3_256};
use tracing::info;
use zeroize::Zeroize;

use crate::blockchain::{
    client::{AiBlockClient, BlockchainClient},
    models::{SdkObject, SdkValue},
};

/// Wallet-side calls: key material generation and balance lookups.
#[async_trait]
pub trait WalletClient: Send + Sync {
    fn generate_seed_phrase(&self) -> Result<String>;

    /// Returns an object exposing `address` and `public_key`.
    fn generate_keypair(&self) -> Result<SdkValue>;

    async fn get_balance(&self, address: &str) -> Result<SdkValue>;

    async fn fetch_balance(&self, addresses: &[String]) -> Result<SdkValue>;
}

/// Local key generation backed by a node client for balances.
#[derive(Clone, Debug)]
pub struct WalletManager {
    node: AiBlockClient,
}

impl WalletManager {
    pub fn new(node: AiBlockClient) -> Self {
        Self { node }
    }
}

/// Address derived from a compressed public key: hex SHA3-256 digest.
pub fn address_from_public_key(public_key: &[u8]) -> String {
    hex::encode(Sha3_256::digest(public_key))
}

#[async_trait]
impl WalletClient for WalletManager {
    fn generate_seed_phrase(&self) -> Result<String> {
        info!("Generating new seed phrase");

        // 128 bits of entropy yield a 12-word phrase
        let mut entropy = [0u8; 16];
        OsRng.fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
            .context("Failed to build mnemonic from entropy");
        entropy.zeroize();
        Ok(mnemonic?.to_string())
    }

    fn generate_keypair(&self) -> Result<SdkValue> {
        info!("Generating new keypair");

        let secret = SecretKey::random(&mut OsRng);
        let public_key = secret
            .public_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let address = address_from_public_key(&public_key);

        Ok(SdkObject::new()
            .with("address", serde_json::Value::String(address))
            .with("public_key", SdkValue::Bytes(public_key))
            .into())
    }

    async fn get_balance(&self, address: &str) -> Result<SdkValue> {
        self.node.get_balance_for_address(address).await
    }

    async fn fetch_balance(&self, addresses: &[String]) -> Result<SdkValue> {
        self.node.fetch_balance(addresses).await
    }
}
