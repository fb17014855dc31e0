//! Prompt templates served through `prompts/list` and `prompts/get`.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),
    #[error("Missing prompt argument: {0}")]
    MissingVariable(String),
}

#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub variables: &'static [&'static str],
    pub template: &'static str,
}

impl PromptTemplate {
    /// Substitutes each `{variable}` placeholder with its argument in one pass.
    /// Argument text is copied verbatim and never rescanned for placeholders.
    pub fn render(&self, args: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut text = String::with_capacity(self.template.len());
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            text.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}').map(|end| (&after[..end], end)) {
                Some((var, end)) if self.variables.iter().any(|v| *v == var) => {
                    let value = args
                        .get(var)
                        .ok_or_else(|| PromptError::MissingVariable(var.to_string()))?;
                    text.push_str(value);
                    rest = &after[end + 1..];
                }
                _ => {
                    text.push('{');
                    rest = after;
                }
            }
        }
        text.push_str(rest);
        Ok(text)
    }
}

pub static PROMPTS: &[PromptTemplate] = &[
    PromptTemplate {
        name: "prompt.block.explain_header",
        title: "Explain Block Header",
        description: "Explain block.header fields (e.g., b_num, previous_hash, timestamp).",
        variables: &["header_json"],
        template: "Given the following SDK-shaped block header JSON, explain each field succinctly:\n\
                   {header_json}\n\
                   Keep names exactly as in the JSON; do not rename or derive new fields.",
    },
    PromptTemplate {
        name: "prompt.block.summarize",
        title: "Summarize Block",
        description: "Summarize a block (header + transactions).",
        variables: &["block_json"],
        template: "Summarize this SDK-shaped block JSON in 3-5 lines, referencing fields verbatim:\n\
                   {block_json}",
    },
    PromptTemplate {
        name: "prompt.tx.explain",
        title: "Explain Transaction",
        description: "Explain a single transaction's key fields.",
        variables: &["transaction_json"],
        template: "Explain the important fields of this SDK-shaped transaction JSON.\n\
                   Use exact field names; keep it concise.\n\
                   {transaction_json}",
    },
    PromptTemplate {
        name: "prompt.tx.summarize_list",
        title: "Summarize Transactions",
        description: "Summarize multiple transactions briefly.",
        variables: &["transactions_json"],
        template: "Provide one short line per transaction from this SDK-shaped list:\n\
                   {transactions_json}",
    },
    PromptTemplate {
        name: "prompt.wallet.balance_summary",
        title: "Wallet Balance Summary",
        description: "Summarize wallet balance(s) from SDK-shaped response.",
        variables: &["balance_json"],
        template: "Summarize these wallet balance details without deriving values or renaming fields:\n\
                   {balance_json}",
    },
    PromptTemplate {
        name: "prompt.error.help",
        title: "Error Help",
        description: "Troubleshooting guidance for an error, without revealing secrets.",
        variables: &["error_message", "context"],
        template: "Given this error message: {error_message}\n\
                   And this context: {context}\n\
                   Suggest next steps to troubleshoot (env vars, network, auth).",
    },
    PromptTemplate {
        name: "prompt.security.seed_guidance",
        title: "Seed Phrase Guidance",
        description: "Safety guidance for handling seed phrases.",
        variables: &[],
        template: "Security reminder: Never share or log seed phrases. Store them securely. \
                   Use environment variables or secret managers; avoid plaintext and version control.",
    },
];

pub fn list_prompt_names() -> Vec<&'static str> {
    PROMPTS.iter().map(|p| p.name).collect()
}

pub fn get_prompt(name: &str) -> Result<&'static PromptTemplate, PromptError> {
    PROMPTS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PromptError::NotFound(name.to_string()))
}

pub fn render_prompt(name: &str, args: &HashMap<String, String>) -> Result<String, PromptError> {
    get_prompt(name)?.render(args)
}
