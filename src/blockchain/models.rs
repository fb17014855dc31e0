// src/blockchain/models.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// --- Error types for query adapters ---

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}

// --- External client results ---

/// Whatever an external client call hands back, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkValue {
    /// A plain mapping, sequence or scalar.
    Json(Value),
    /// Raw binary, rendered as lowercase hex once it reaches JSON.
    Bytes(Vec<u8>),
    /// An attribute-bearing wrapper, such as a result object.
    Object(SdkObject),
}

impl SdkValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SdkValue::Json(Value::Null))
    }

    /// Lossless for `Json`; bytes become hex and objects become their attribute mapping.
    pub fn into_json(self) -> Value {
        match self {
            SdkValue::Json(v) => v,
            SdkValue::Bytes(b) => Value::String(hex::encode(b)),
            SdkValue::Object(obj) => Value::Object(obj.into_json_map()),
        }
    }
}

impl From<Value> for SdkValue {
    fn from(v: Value) -> Self {
        SdkValue::Json(v)
    }
}

impl From<SdkObject> for SdkValue {
    fn from(obj: SdkObject) -> Self {
        SdkValue::Object(obj)
    }
}

/// Named attributes of a wrapper object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdkObject {
    attributes: BTreeMap<String, SdkValue>,
}

impl SdkObject {
    /// Name of the private-convention slot some result wrappers keep their payload in.
    pub const PRIVATE_VALUE: &'static str = "_value";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<SdkValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// A result wrapper holding `payload` under `attr`.
    pub fn wrapping(attr: &str, payload: impl Into<SdkValue>) -> Self {
        Self::new().with(attr, payload)
    }

    pub fn attr(&self, name: &str) -> Option<&SdkValue> {
        self.attributes.get(name)
    }

    pub fn take_attr(&mut self, name: &str) -> Option<SdkValue> {
        self.attributes.remove(name)
    }

    pub fn into_json_map(self) -> Map<String, Value> {
        self.attributes
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect()
    }
}

// --- Normalized responses ---

/// The stable `{ok, id, status, reason, route, content}` shape every query adapter returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResponse<C = Value> {
    #[serde(default = "default_ok")]
    pub ok: bool,
    pub id: String,
    pub status: String,
    pub reason: String,
    pub route: String,
    pub content: C,
}

fn default_ok() -> bool {
    true
}

impl<C> NormalizedResponse<C> {
    /// Builds a response, copying envelope strings out of `envelope` when present.
    pub fn from_envelope(envelope: &Map<String, Value>, content: C) -> Self {
        Self {
            ok: true,
            id: envelope_text(envelope, "id"),
            status: envelope_text(envelope, "status"),
            reason: envelope_text(envelope, "reason"),
            route: envelope_text(envelope, "route"),
            content,
        }
    }

    /// A response with every envelope string left empty.
    pub fn bare(content: C) -> Self {
        Self {
            ok: true,
            id: String::new(),
            status: String::new(),
            reason: String::new(),
            route: String::new(),
            content,
        }
    }
}

impl NormalizedResponse<Value> {
    /// A normally-shaped response reporting a failure that was caught before the client call.
    pub fn error_status(route: &str, reason: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: String::new(),
            status: "Error".to_string(),
            reason: reason.into(),
            route: route.to_string(),
            content: Value::Object(Map::new()),
        }
    }
}

fn envelope_text(envelope: &Map<String, Value>, key: &str) -> String {
    match envelope.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// --- Block models ---

/// Block header fields, copied verbatim from the node response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i64,
    pub bits: Value,
    pub nonce_and_mining_tx_hash: Value,
    pub b_num: i64,
    pub timestamp: i64,
    pub difficulty: Value,
    pub seed_value: Value,
    pub previous_hash: String,
    pub txs_merkle_root_and_hash: Value,
}

impl BlockHeader {
    /// Every field is mandatory; the first absent one aborts the build.
    pub fn from_map(header: &Map<String, Value>) -> Result<Self, ServiceError> {
        Ok(Self {
            version: int_field(header, "version")?,
            bits: any_field(header, "bits")?,
            nonce_and_mining_tx_hash: any_field(header, "nonce_and_mining_tx_hash")?,
            b_num: int_field(header, "b_num")?,
            timestamp: int_field(header, "timestamp")?,
            difficulty: any_field(header, "difficulty")?,
            seed_value: any_field(header, "seed_value")?,
            previous_hash: string_field(header, "previous_hash")?,
            txs_merkle_root_and_hash: any_field(header, "txs_merkle_root_and_hash")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockContent {
    pub block: Block,
}

fn any_field(map: &Map<String, Value>, key: &str) -> Result<Value, ServiceError> {
    map.get(key)
        .cloned()
        .ok_or_else(|| ServiceError::MissingField(format!("header.{}", key)))
}

fn int_field(map: &Map<String, Value>, key: &str) -> Result<i64, ServiceError> {
    let invalid = |reason: &str| ServiceError::InvalidField {
        field: format!("header.{}", key),
        reason: reason.to_string(),
    };
    match any_field(map, key)? {
        Value::Number(n) => n.as_i64().ok_or_else(|| invalid("expected an integer")),
        Value::String(s) => s.trim().parse().map_err(|_| invalid("expected an integer")),
        _ => Err(invalid("expected an integer")),
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Result<String, ServiceError> {
    match any_field(map, key)? {
        Value::String(s) => Ok(s),
        _ => Err(ServiceError::InvalidField {
            field: format!("header.{}", key),
            reason: "expected a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header_json() -> Value {
        json!({
            "version": 2,
            "bits": 4,
            "nonce_and_mining_tx_hash": [[1, 2, 3], "g0a1b2"],
            "b_num": 1234,
            "timestamp": 1700000000,
            "difficulty": [],
            "seed_value": [9, 9],
            "previous_hash": "a3f1",
            "txs_merkle_root_and_hash": ["", "ff00"]
        })
    }

    #[test]
    fn header_fields_round_trip_verbatim() {
        let input = header_json();
        let header = BlockHeader::from_map(input.as_object().unwrap()).unwrap();
        assert_eq!(serde_json::to_value(&header).unwrap(), input);
    }

    #[test]
    fn header_missing_field_is_an_error() {
        let mut input = header_json();
        input.as_object_mut().unwrap().remove("seed_value");
        let err = BlockHeader::from_map(input.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::MissingField(f) if f == "header.seed_value"));
    }

    #[test]
    fn header_integer_fields_reject_non_integers() {
        let mut input = header_json();
        input["timestamp"] = json!({"secs": 1});
        let err = BlockHeader::from_map(input.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidField { .. }));

        input["timestamp"] = json!("1700000001");
        let header = BlockHeader::from_map(input.as_object().unwrap()).unwrap();
        assert_eq!(header.timestamp, 1700000001);
    }

    #[test]
    fn envelope_strings_default_to_empty() {
        let env = json!({"id": "r-1", "status": null, "route": 7});
        let resp = NormalizedResponse::from_envelope(env.as_object().unwrap(), json!(1));
        assert!(resp.ok);
        assert_eq!(resp.id, "r-1");
        assert_eq!(resp.status, "");
        assert_eq!(resp.reason, "");
        assert_eq!(resp.route, "7");
    }

    #[test]
    fn sdk_values_flatten_to_json() {
        let obj = SdkObject::new()
            .with("address", json!("abc"))
            .with("public_key", SdkValue::Bytes(vec![0xde, 0xad]));
        assert_eq!(
            SdkValue::from(obj).into_json(),
            json!({"address": "abc", "public_key": "dead"})
        );
    }
}
