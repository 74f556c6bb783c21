//! External bureau integrations
//!
//! This module provides:
//! - API types for the Receita Federal company record
//! - Client for fetching company records from Receita Federal
//! - Prometheus metrics recorded for every bureau call

pub mod metrics;
pub mod receita_federal;
pub mod types;

use async_trait::async_trait;

pub use metrics::{BureauMetrics, MetricsRegistry, SharedMetricsRegistry};
pub use receita_federal::ReceitaFederalClient;
pub use types::*;

/// Failure modes of a bureau call. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum BureauError {
    /// The request could not be built or sent (DNS, connect, timeout, bad URL).
    #[error("could not get data from {bureau}: {source}. Url: {url}")]
    Transport {
        bureau: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The bureau answered with something other than 200.
    #[error("unexpected status code from {bureau}: {status}. Url: {url}")]
    UnexpectedStatus {
        bureau: &'static str,
        status: u16,
        url: String,
    },

    /// A 200 whose body could not be read in full or is not a valid
    /// company record.
    #[error("could not decode data from {bureau}: {source}")]
    Decode {
        bureau: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Fetches company profiles from a bureau.
#[async_trait]
pub trait BureauService: Send + Sync {
    /// Fetch the company identified by `cnpj`, on behalf of requester `cpf`.
    async fn fetch(&self, cnpj: &str, cpf: &str) -> Result<Empresa, BureauError>;
}
