use tracing::info;

use crate::blockchain::{
    client::BlockchainClient,
    models::{NormalizedResponse, SdkValue, ServiceError},
    normalize::{as_dict, content_of, unwrap},
};

/// Any ledger record addressable by hash.
pub async fn get_entry_by_hash(
    client: &dyn BlockchainClient,
    hash: &str,
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching blockchain entry {}", hash);
    Ok(passthrough(client.get_blockchain_entry(hash).await?))
}

pub async fn get_transaction_by_hash(
    client: &dyn BlockchainClient,
    tx_hash: &str,
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching transaction {}", tx_hash);
    Ok(passthrough(client.get_transaction_by_hash(tx_hash).await?))
}

pub async fn fetch_transactions(
    client: &dyn BlockchainClient,
    tx_hashes: &[String],
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching {} transactions", tx_hashes.len());
    Ok(passthrough(client.fetch_transactions(tx_hashes).await?))
}

/// Normalizes a result whose content stays opaque.
pub(crate) fn passthrough(raw: SdkValue) -> NormalizedResponse {
    let d = as_dict(unwrap(raw));
    NormalizedResponse::from_envelope(&d, content_of(&d))
}
