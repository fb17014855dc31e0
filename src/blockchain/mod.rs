// src/blockchain/mod.rs

pub mod client;
pub use client::{AiBlockClient, BlockchainClient};

pub mod models;
pub mod normalize;
pub mod services;
pub mod wallet_manager;

pub use models::{NormalizedResponse, SdkObject, SdkValue, ServiceError};
pub use wallet_manager::{WalletClient, WalletManager};
