use serde_json::Value;
use tracing::info;

use crate::blockchain::{
    client::BlockchainClient,
    models::{NormalizedResponse, SdkValue, ServiceError},
    normalize::{content_of, unwrap},
};

pub async fn get_total_supply(
    client: &dyn BlockchainClient,
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching total supply");
    Ok(supply_response(client.get_total_supply().await?))
}

pub async fn get_issued_supply(
    client: &dyn BlockchainClient,
) -> Result<NormalizedResponse, ServiceError> {
    info!("Fetching issued supply");
    Ok(supply_response(client.get_issued_supply().await?))
}

// Nodes may answer with a full envelope or with a bare figure.
fn supply_response(raw: SdkValue) -> NormalizedResponse {
    match unwrap(raw).into_json() {
        Value::Object(d) => NormalizedResponse::from_envelope(&d, content_of(&d)),
        figure => NormalizedResponse::bare(figure),
    }
}
