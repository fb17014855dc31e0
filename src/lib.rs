// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;
pub mod utils;

#[cfg(test)]
mod test_support;

use blockchain::{AiBlockClient, BlockchainClient, WalletClient, WalletManager};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, loaded once at startup
    pub config: Arc<config::Config>,
    /// Node client used by the query adapters
    pub blockchain: Arc<dyn BlockchainClient>,
    /// Wallet client for key generation and balances
    pub wallet: Arc<dyn WalletClient>,
}

impl AppState {
    /// State backed by the AIBlock HTTP clients.
    pub fn new(config: config::Config) -> Self {
        let node = AiBlockClient::new(&config);
        Self {
            config: Arc::new(config),
            blockchain: Arc::new(node.clone()),
            wallet: Arc::new(WalletManager::new(node)),
        }
    }

    pub fn with_clients(
        config: config::Config,
        blockchain: Arc<dyn BlockchainClient>,
        wallet: Arc<dyn WalletClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            blockchain,
            wallet,
        }
    }
}
