//! Service configuration.
//!
//! Reads config from env vars (a `.env` file is loaded first when present):
//!   CREDIT_BIND_ADDR      — API listen address (default: 0.0.0.0:8080)
//!   CREDIT_METRICS_ADDR   — metrics listen address (default: 0.0.0.0:9090)
//!   RECEITA_FEDERAL_URL   — bureau base URL (default: production gateway)
//!   RECEITA_FEDERAL_TOKEN — bureau bearer token (required)
//!   BUREAU_TIMEOUT_SECS   — outbound request timeout (default: 30)
//!   DATABASE_URL          — Postgres connection string (optional)

use std::net::SocketAddr;
use std::time::Duration;

use crate::bureaus::receita_federal::RECEITA_FEDERAL_BASE_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:9090";
const DEFAULT_BUREAU_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub metrics_addr: SocketAddr,
    pub receita_federal_url: String,
    pub receita_federal_token: String,
    pub bureau_timeout: Duration,
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_addr(
            "CREDIT_BIND_ADDR",
            get("CREDIT_BIND_ADDR").as_deref().unwrap_or(DEFAULT_BIND_ADDR),
        )?;
        let metrics_addr = parse_addr(
            "CREDIT_METRICS_ADDR",
            get("CREDIT_METRICS_ADDR")
                .as_deref()
                .unwrap_or(DEFAULT_METRICS_ADDR),
        )?;

        let receita_federal_url = get("RECEITA_FEDERAL_URL")
            .unwrap_or_else(|| RECEITA_FEDERAL_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let receita_federal_token =
            get("RECEITA_FEDERAL_TOKEN").ok_or(ConfigError::Missing("RECEITA_FEDERAL_TOKEN"))?;

        let bureau_timeout = match get("BUREAU_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "BUREAU_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "BUREAU_TIMEOUT_SECS",
                        reason: "timeout must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_BUREAU_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            metrics_addr,
            receita_federal_url,
            receita_federal_token,
            bureau_timeout,
            database_url: get("DATABASE_URL"),
        })
    }
}

fn parse_addr(var: &'static str, raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}
