use serde_json::{Map, Value};
use tracing::info;

use crate::blockchain::{
    client::BlockchainClient,
    models::{Block, BlockContent, BlockHeader, NormalizedResponse, ServiceError},
    normalize::{as_dict, find_in, unwrap},
};

pub type BlockResponse = NormalizedResponse<BlockContent>;

/// Fetches the chain tip. The header must sit at `content.block.header`.
pub async fn get_latest_block(client: &dyn BlockchainClient) -> Result<BlockResponse, ServiceError> {
    info!("Fetching latest block");
    let d = as_dict(unwrap(client.get_latest_block().await?));

    let content = required_map(&d, "content", "content")?;
    let block = required_map(content, "block", "content.block")?;
    let header = required_map(block, "header", "content.block.header")?;

    let block = Block {
        header: BlockHeader::from_map(header)?,
        transactions: block
            .get("transactions")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    };
    Ok(NormalizedResponse::from_envelope(&d, BlockContent { block }))
}

/// Fetches a block by height. Header and block nodes are located by key
/// wherever the route happened to nest them.
pub async fn get_block_by_number(
    client: &dyn BlockchainClient,
    block_num: u64,
) -> Result<BlockResponse, ServiceError> {
    info!("Fetching block {}", block_num);
    let d = as_dict(unwrap(client.get_block_by_num(block_num).await?));

    let header = match find_in(&d, &["header"]) {
        Some(Value::Object(h)) => h,
        None | Some(Value::Null) => return Err(ServiceError::MissingField("header".to_string())),
        Some(_) => {
            return Err(ServiceError::InvalidField {
                field: "header".to_string(),
                reason: "expected a mapping".to_string(),
            })
        }
    };
    let header = BlockHeader::from_map(header)?;

    let transactions = match find_in(&d, &["block"]) {
        Some(Value::Object(block)) => block
            .get("transactions")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };

    Ok(NormalizedResponse::from_envelope(
        &d,
        BlockContent {
            block: Block {
                header,
                transactions,
            },
        },
    ))
}

fn required_map<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ServiceError> {
    match map.get(key) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(ServiceError::InvalidField {
            field: path.to_string(),
            reason: "expected a mapping".to_string(),
        }),
        None => Err(ServiceError::MissingField(path.to_string())),
    }
}
