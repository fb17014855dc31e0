use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::blockchain::{
    models::{SdkObject, SdkValue, ServiceError},
    normalize::unwrap_object,
    wallet_manager::WalletClient,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedPhraseResponse {
    pub ok: bool,
    #[serde(rename = "seedPhrase")]
    pub seed_phrase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeypairResponse {
    pub ok: bool,
    pub address: Option<String>,
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,
}

pub fn generate_seed_phrase(wallet: &dyn WalletClient) -> Result<SeedPhraseResponse, ServiceError> {
    let seed_phrase = wallet.generate_seed_phrase()?;
    Ok(SeedPhraseResponse {
        ok: true,
        seed_phrase,
    })
}

/// Generates a fresh random keypair. A supplied seed phrase is not used for derivation.
pub fn generate_keypair(
    wallet: &dyn WalletClient,
    seed_phrase: Option<&str>,
) -> Result<KeypairResponse, ServiceError> {
    if seed_phrase.is_some_and(|s| !s.trim().is_empty()) {
        warn!("Seed phrase supplied to generate-keypair; derivation is not supported, generating a random keypair");
    }
    let keypair = unwrap_object(wallet.generate_keypair()?);
    info!("Keypair generated");

    let (address, public_key) = match keypair {
        SdkValue::Object(obj) => (
            first_attr(&obj, &["address", "addr"]),
            first_attr(&obj, &["publicKey", "public_key"]),
        ),
        SdkValue::Json(Value::Object(map)) => (
            first_key(&map, &["address", "addr"]),
            first_key(&map, &["publicKey", "public_key"]),
        ),
        _ => (None, None),
    };

    Ok(KeypairResponse {
        ok: true,
        address,
        public_key,
    })
}

fn first_attr(obj: &SdkObject, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| obj.attr(n))
        .find_map(to_text)
}

fn first_key(map: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| map.get(*n))
        .find_map(|v| to_text(&SdkValue::Json(v.clone())))
}

/// Text form of a key field: bytes as lowercase hex, strings verbatim.
pub fn to_text(value: &SdkValue) -> Option<String> {
    match value {
        SdkValue::Json(Value::Null) => None,
        SdkValue::Json(Value::String(s)) if s.is_empty() => None,
        SdkValue::Json(Value::String(s)) => Some(s.clone()),
        SdkValue::Bytes(b) => Some(hex::encode(b)),
        other => Some(other.clone().into_json().to_string()),
    }
}
