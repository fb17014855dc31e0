//! # MCP Handler Module
//!
//! This module implements the Model Context Protocol (MCP) for the AIBlock server.
//! It handles incoming MCP requests and dispatches them to the query adapters.
//!
//! ## Supported Tools
//!
//! ### Service
//! - `health` - Liveness check with the server clock
//! - `version` - Server version
//!
//! ### Blockchain Queries
//! - `get-latest-block` - Chain tip with its header
//! - `get-block-by-number` - Block at a given height
//! - `get-entry-by-hash` - Any ledger entry by hash
//! - `get-transaction-by-hash` - Single transaction
//! - `fetch-transactions` - Several transactions at once
//! - `get-total-supply` / `get-issued-supply` - Token supply figures
//! - `get-address-balance` - Balance of one address
//!
//! ### Wallet
//! - `get-balance` - Balance of the process wallet
//! - `fetch-balance` - Balances for a list of addresses
//! - `generate-seed-phrase` - New BIP-39 phrase
//! - `generate-keypair` - New random keypair
//!
//! Prompts are served through `prompts/list` and `prompts/get`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use validator::Validate;

use crate::{
    api::health,
    blockchain::{
        models::ServiceError,
        services::{balance, blocks, supply, transactions, wallet},
    },
    mcp::{
        prompts::{self, PromptError},
        protocol::{error_codes, tool_result, Request, Response, PROTOCOL_VERSION},
    },
    utils::{self, validate_hex, validate_hex_list, validate_non_empty, validate_non_empty_list},
    AppState,
};

// Tool names that may also be sent directly as the JSON-RPC method.
const TOOL_NAMES: &[&str] = &[
    "health",
    "version",
    "get-latest-block",
    "get-balance",
    "fetch-balance",
    "get-total-supply",
    "get-issued-supply",
    "get-block-by-number",
    "get-entry-by-hash",
    "get-transaction-by-hash",
    "fetch-transactions",
    "get-address-balance",
    "generate-seed-phrase",
    "generate-keypair",
];

// --- Tool arguments ---

#[derive(Debug, Deserialize, Validate)]
struct BlockByNumberArgs {
    height: u64,
}

#[derive(Debug, Deserialize, Validate)]
struct EntryArgs {
    #[validate(custom = "validate_non_empty")]
    hash: String,
}

#[derive(Debug, Deserialize, Validate)]
struct TransactionArgs {
    #[validate(custom = "validate_non_empty")]
    tx_hash: String,
}

#[derive(Debug, Deserialize, Validate)]
struct TransactionListArgs {
    #[validate(length(min = 1), custom = "validate_non_empty_list")]
    tx_hashes: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct AddressArgs {
    #[validate(custom = "validate_hex")]
    address: String,
}

#[derive(Debug, Deserialize, Validate)]
struct AddressListArgs {
    #[validate(length(min = 1), custom = "validate_hex_list")]
    addresses: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct KeypairArgs {
    #[serde(rename = "seedPhrase", default)]
    seed_phrase: Option<String>,
}

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    if req.jsonrpc != "2.0" {
        return Some(Response::error(
            req.id,
            error_codes::INVALID_REQUEST,
            format!("Unsupported jsonrpc version: {}", req.jsonrpc),
        ));
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id.clone(), json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        "prompts/list" => handle_prompts_list(&req),
        "prompts/get" => handle_prompt_get(&req),
        // Direct tool calls are rewritten into tools/call
        method if TOOL_NAMES.contains(&method) => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": method,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the matching adapter.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let Some(params) = req.params.as_ref() else {
        return Response::error(
            req.id,
            error_codes::INVALID_PARAMS,
            "Missing 'params' object".into(),
        );
    };

    let Some(tool_name) = params.get("name").and_then(|n| n.as_str()) else {
        return Response::error(
            req.id,
            error_codes::INVALID_PARAMS,
            "Missing 'name' field in params".into(),
        );
    };

    let args = req.arguments();
    let req_id = &req.id;
    let chain = state.blockchain.as_ref();
    let wallet_client = state.wallet.as_ref();
    info!("[tool] {} invoked", tool_name);

    let res: Result<Response, Response> = (async {
        match tool_name {
            "health" => Ok(Response::success(req_id.clone(), tool_result(health::health()))),
            "version" => Ok(Response::success(req_id.clone(), tool_result(health::version()))),
            "get-latest-block" => respond(req_id, blocks::get_latest_block(chain).await),
            "get-block-by-number" => {
                let a: BlockByNumberArgs = utils::parse_args(&args, req_id)?;
                respond(req_id, blocks::get_block_by_number(chain, a.height).await)
            }
            "get-total-supply" => respond(req_id, supply::get_total_supply(chain).await),
            "get-issued-supply" => respond(req_id, supply::get_issued_supply(chain).await),
            "get-entry-by-hash" => {
                let a: EntryArgs = utils::parse_args(&args, req_id)?;
                respond(req_id, transactions::get_entry_by_hash(chain, &a.hash).await)
            }
            "get-transaction-by-hash" => {
                let a: TransactionArgs = utils::parse_args(&args, req_id)?;
                respond(
                    req_id,
                    transactions::get_transaction_by_hash(chain, &a.tx_hash).await,
                )
            }
            "fetch-transactions" => {
                let a: TransactionListArgs = utils::parse_args(&args, req_id)?;
                respond(
                    req_id,
                    transactions::fetch_transactions(chain, &a.tx_hashes).await,
                )
            }
            "get-address-balance" => {
                let a: AddressArgs = utils::parse_args(&args, req_id)?;
                respond(req_id, balance::get_balance(chain, &a.address).await)
            }
            "get-balance" => respond(
                req_id,
                balance::get_wallet_balance(&state.config, wallet_client).await,
            ),
            "fetch-balance" => {
                let a: AddressListArgs = utils::parse_args(&args, req_id)?;
                respond(
                    req_id,
                    balance::fetch_balance(&state.config, wallet_client, &a.addresses).await,
                )
            }
            "generate-seed-phrase" => respond(req_id, wallet::generate_seed_phrase(wallet_client)),
            "generate-keypair" => {
                let a: KeypairArgs = utils::parse_args(&args, req_id)?;
                respond(
                    req_id,
                    wallet::generate_keypair(wallet_client, a.seed_phrase.as_deref()),
                )
            }
            _ => Err(Response::error(
                req_id.clone(),
                error_codes::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", tool_name),
            )),
        }
    })
    .await;
    res.unwrap_or_else(|err_resp| err_resp)
}

// Adapter failures surface as protocol-level errors.
fn respond<T: Serialize>(req_id: &Value, result: Result<T, ServiceError>) -> Result<Response, Response> {
    let payload = result.map_err(|e| {
        error!("Tool execution failed: {}", e);
        Response::error(req_id.clone(), error_codes::INTERNAL_ERROR, e.to_string())
    })?;
    let payload = serde_json::to_value(payload).map_err(|e| {
        Response::error(req_id.clone(), error_codes::INTERNAL_ERROR, e.to_string())
    })?;
    Ok(Response::success(req_id.clone(), tool_result(payload)))
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": "aiblock-mcp",
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({
        "tools": { "listChanged": false },
        "prompts": { "listChanged": false }
    });
    let instructions =
        "AIBlock MCP server for read-only block, transaction, supply and balance queries, plus wallet key generation.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

fn no_args() -> Value {
    json!({ "type": "object", "properties": {}, "additionalProperties": false })
}

/// Handles the 'tools/list' request by returning a JSON definition of all available tools.
fn handle_tools_list(req: &Request) -> Response {
    let tools = json!([
        {
            "name": "health",
            "description": "Liveness check. Returns ok and the server time in unix seconds.",
            "inputSchema": no_args()
        },
        {
            "name": "version",
            "description": "Version of this MCP server.",
            "inputSchema": no_args()
        },
        {
            "name": "get-latest-block",
            "description": "Get the latest block (header and transactions) from the AIBlock storage node.",
            "inputSchema": no_args()
        },
        {
            "name": "get-balance",
            "description": "Get the balance of the server's configured wallet.",
            "inputSchema": no_args()
        },
        {
            "name": "fetch-balance",
            "description": "Fetch balances for a list of hex-encoded addresses.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "addresses": {"type": "array", "items": {"type": "string"}, "description": "Hex-encoded addresses"}
                },
                "required": ["addresses"]
            }
        },
        {
            "name": "get-total-supply",
            "description": "Get the total token supply.",
            "inputSchema": no_args()
        },
        {
            "name": "get-issued-supply",
            "description": "Get the issued token supply.",
            "inputSchema": no_args()
        },
        {
            "name": "get-block-by-number",
            "description": "Get a block by its height.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "height": {"type": "integer", "minimum": 0, "description": "Block number"}
                },
                "required": ["height"]
            }
        },
        {
            "name": "get-entry-by-hash",
            "description": "Get any blockchain entry (block or transaction) by hash.",
            "inputSchema": {
                "type": "object",
                "properties": {"hash": {"type": "string"}},
                "required": ["hash"]
            }
        },
        {
            "name": "get-transaction-by-hash",
            "description": "Get a transaction by hash.",
            "inputSchema": {
                "type": "object",
                "properties": {"tx_hash": {"type": "string"}},
                "required": ["tx_hash"]
            }
        },
        {
            "name": "fetch-transactions",
            "description": "Fetch several transactions by hash.",
            "inputSchema": {
                "type": "object",
                "properties": {"tx_hashes": {"type": "array", "items": {"type": "string"}}},
                "required": ["tx_hashes"]
            }
        },
        {
            "name": "get-address-balance",
            "description": "Get the balance of a single hex-encoded address.",
            "inputSchema": {
                "type": "object",
                "properties": {"address": {"type": "string"}},
                "required": ["address"]
            }
        },
        {
            "name": "generate-seed-phrase",
            "description": "Generate a new 12-word seed phrase. Store it securely; it is never logged.",
            "inputSchema": no_args()
        },
        {
            "name": "generate-keypair",
            "description": "Generate a new random keypair. Returns address and public key.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "seedPhrase": {"type": "string", "description": "Accepted but not used for derivation"}
                }
            }
        },
    ]);
    Response::success(req.id.clone(), json!({ "tools": tools }))
}

fn handle_prompts_list(req: &Request) -> Response {
    let prompts: Vec<Value> = prompts::PROMPTS
        .iter()
        .map(|p| {
            let arguments: Vec<Value> = p
                .variables
                .iter()
                .map(|v| json!({ "name": v, "required": true }))
                .collect();
            json!({
                "name": p.name,
                "title": p.title,
                "description": p.description,
                "arguments": arguments
            })
        })
        .collect();
    Response::success(req.id.clone(), json!({ "prompts": prompts }))
}

fn handle_prompt_get(req: &Request) -> Response {
    let params = req.params.clone().unwrap_or_else(|| json!({}));
    let name: String = match utils::get_required_arg(&params, "name", &req.id) {
        Ok(name) => name,
        Err(resp) => return resp,
    };

    let args: HashMap<String, String> = match serde_json::from_value(req.arguments()) {
        Ok(args) => args,
        Err(e) => {
            return Response::error(
                req.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Prompt arguments must be strings: {}", e),
            )
        }
    };

    let rendered = prompts::get_prompt(&name)
        .and_then(|p| Ok((p.description, prompts::render_prompt(&name, &args)?)));
    match rendered {
        Ok((description, text)) => Response::success(
            req.id.clone(),
            json!({
                "description": description,
                "messages": [{
                    "role": "user",
                    "content": { "type": "text", "text": text }
                }]
            }),
        ),
        Err(e @ PromptError::NotFound(_)) => Response::error(
            req.id.clone(),
            error_codes::INVALID_PARAMS,
            format!("{} (available: {})", e, prompts::list_prompt_names().join(", ")),
        ),
        Err(e) => Response::error(req.id.clone(), error_codes::INVALID_PARAMS, e.to_string()),
    }
}
