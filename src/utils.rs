//! Argument helpers and input validators for the AIBlock MCP server

use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};
use validator::{Validate, ValidationError};

use crate::mcp::protocol::{error_codes, Response};

/// Helper function to extract a required argument from a JSON object
pub fn get_required_arg<T: DeserializeOwned>(
    args: &Value,
    key: &str,
    req_id: &Value,
) -> Result<T, Response> {
    from_value(args.get(key).cloned().unwrap_or(Value::Null)).map_err(|_| {
        Response::error(
            req_id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Missing or invalid required argument: '{}'", key),
        )
    })
}

/// Deserializes the whole argument object and runs its validation rules.
pub fn parse_args<T: DeserializeOwned + Validate>(args: &Value, req_id: &Value) -> Result<T, Response> {
    let parsed: T = from_value(args.clone()).map_err(|e| {
        Response::error(
            req_id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Invalid arguments: {}", e),
        )
    })?;
    parsed.validate().map_err(|e| {
        Response::error(
            req_id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Invalid arguments: {}", e),
        )
    })?;
    Ok(parsed)
}

pub fn ensure_non_empty<'a>(value: &'a str, name: &str) -> Result<&'a str, String> {
    if value.trim().is_empty() {
        return Err(format!("{} must be a non-empty string", name));
    }
    Ok(value)
}

pub fn ensure_hex<'a>(value: &'a str, name: &str) -> Result<&'a str, String> {
    ensure_non_empty(value, name)?;
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{} must be hex-encoded", name));
    }
    Ok(value)
}

// validator custom hooks

pub fn validate_non_empty(value: &str) -> Result<(), ValidationError> {
    ensure_non_empty(value, "value").map(|_| ()).map_err(|_| ValidationError::new("empty"))
}

pub fn validate_hex(value: &str) -> Result<(), ValidationError> {
    ensure_hex(value, "address").map(|_| ()).map_err(|_| ValidationError::new("not_hex"))
}

pub fn validate_hex_list(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|v| validate_hex(v))
}

pub fn validate_non_empty_list(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|v| validate_non_empty(v))
}
