// src/config.rs

use std::env;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Reasons the environment-derived configuration cannot back a wallet call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AIBLOCK_PASSPHRASE is not set")]
    MissingPassphrase,
    #[error("{0} is not set")]
    MissingHost(&'static str),
    #[error("{var} is not a valid URL: {reason}")]
    InvalidHost { var: &'static str, reason: String },
    #[error("AIBLOCK_WALLET_ADDRESS is not set")]
    MissingWalletAddress,
}

// A struct to hold all configuration, loaded once at startup from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub host: String,
    pub port: u16,
    /// Origins allowed on the HTTP transport; `*` allows any origin.
    pub allow_origins: Vec<String>,
    pub log_level: String,

    // AIBlock network settings
    pub passphrase: SecretString,
    pub storage_host: Option<String>,
    pub mempool_host: Option<String>,
    pub valence_host: Option<String>,

    /// Address the process wallet answers balance queries for.
    pub wallet_address: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allow_origins: vec!["*".to_string()],
            log_level: "INFO".to_string(),
            passphrase: SecretString::new(String::new()),
            storage_host: None,
            mempool_host: None,
            valence_host: None,
            wallet_address: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        Ok(Config {
            host: env::var("MCP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            allow_origins: parse_origins(env::var("MCP_ALLOW_ORIGINS").ok().as_deref()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),

            passphrase: SecretString::new(env::var("AIBLOCK_PASSPHRASE").unwrap_or_default()),
            storage_host: non_empty_var("AIBLOCK_STORAGE_HOST"),
            mempool_host: non_empty_var("AIBLOCK_MEMPOOL_HOST"),
            valence_host: non_empty_var("AIBLOCK_VALENCE_HOST"),

            wallet_address: non_empty_var("AIBLOCK_WALLET_ADDRESS"),
        })
    }

    /// True when every origin is accepted.
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|o| o == "*")
    }

    /// Parsed storage node base URL.
    pub fn storage_url(&self) -> Result<Url, ConfigError> {
        parse_host("AIBLOCK_STORAGE_HOST", self.storage_host.as_deref())
    }

    /// Parsed mempool node base URL.
    pub fn mempool_url(&self) -> Result<Url, ConfigError> {
        parse_host("AIBLOCK_MEMPOOL_HOST", self.mempool_host.as_deref())
    }

    /// Checks that the configuration can back a wallet network call.
    pub fn validate_wallet(&self) -> Result<(), ConfigError> {
        if self.passphrase.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingPassphrase);
        }
        self.storage_url()?;
        self.mempool_url()?;
        Ok(())
    }

    /// Address of the process wallet, once the wallet config is valid.
    pub fn wallet_identity(&self) -> Result<&str, ConfigError> {
        self.validate_wallet()?;
        self.wallet_address
            .as_deref()
            .ok_or(ConfigError::MissingWalletAddress)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

fn parse_host(var: &'static str, raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = raw.ok_or(ConfigError::MissingHost(var))?;
    Url::parse(raw).map_err(|e| ConfigError::InvalidHost {
        var,
        reason: e.to_string(),
    })
}
