use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    blockchain::{
        client::BlockchainClient,
        models::{NormalizedResponse, SdkValue, ServiceError},
        normalize::{content_of, unwrap_object},
        wallet_manager::WalletClient,
    },
    config::Config,
};

pub const GET_BALANCE_ROUTE: &str = "wallet.get_balance";
pub const FETCH_BALANCE_ROUTE: &str = "wallet.fetch_balance";

/// Balance of a single address, straight from the node.
pub async fn get_balance(
    client: &dyn BlockchainClient,
    address: &str,
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching balance for address {}", address);
    let raw = client.get_balance_for_address(address).await?;
    Ok(super::transactions::passthrough(raw))
}

/// Balance of the process wallet. An unusable configuration is reported as an
/// error-status response instead of a failure.
pub async fn get_wallet_balance(
    config: &Config,
    wallet: &dyn WalletClient,
) -> Result<NormalizedResponse, ServiceError> {
    let address = match config.wallet_identity() {
        Ok(address) => address,
        Err(e) => {
            warn!("Wallet config invalid: {}", e);
            return Ok(NormalizedResponse::error_status(
                GET_BALANCE_ROUTE,
                format!("AIBlock config invalid: {}", e),
            ));
        }
    };
    info!("Fetching wallet balance");
    let raw = wallet.get_balance(address).await?;
    Ok(wallet_response(raw, "balance"))
}

/// Balances for a list of addresses, validated against the wallet configuration first.
pub async fn fetch_balance(
    config: &Config,
    wallet: &dyn WalletClient,
    addresses: &[String],
) -> Result<NormalizedResponse, ServiceError> {
    if let Err(e) = config.validate_wallet() {
        warn!("Wallet config invalid: {}", e);
        return Ok(NormalizedResponse::error_status(
            FETCH_BALANCE_ROUTE,
            format!("AIBlock config invalid: {}", e),
        ));
    }
    info!("Fetching balances for {} addresses", addresses.len());
    let raw = wallet.fetch_balance(addresses).await?;
    Ok(wallet_response(raw, "balances"))
}

// Only the result object is stripped. Non-mapping payloads are keyed under `scalar_key`.
fn wallet_response(raw: SdkValue, scalar_key: &str) -> NormalizedResponse {
    let d = match unwrap_object(raw).into_json() {
        Value::Object(d) => d,
        other => {
            let mut d = Map::new();
            d.insert(scalar_key.to_string(), other);
            d
        }
    };
    NormalizedResponse::from_envelope(&d, content_of(&d))
}
