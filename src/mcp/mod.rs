// MCP protocol surface: JSON-RPC envelopes, the request dispatcher and prompt catalog
pub mod handler;
pub mod prompts;
pub mod protocol;
