//! Receita Federal API Client
//!
//! Fetches company records from the `api-cnpj-empresa` endpoint of the
//! Conecta gov gateway. Every call that gets a response, whatever its
//! status, is recorded in [`BureauMetrics`] before the body is touched.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use super::metrics::BureauMetrics;
use super::types::Empresa;
use super::{BureauError, BureauService};
use crate::config::Config;

/// Production gateway.
pub const RECEITA_FEDERAL_BASE_URL: &str = "https://apigateway.conectagov.estaleiro.serpro.gov.br";

/// `bureau_name` label and error prefix for this bureau.
pub const BUREAU_NAME: &str = "receita_federal";

const DISPLAY_NAME: &str = "Receita Federal";
const REQUESTER_HEADER: &str = "x-cpf-usuario";

pub struct ReceitaFederalClient {
    client: Client,
    base_url: String,
    /// OAuth2 access token
    token: String,
    metrics: BureauMetrics,
}

impl ReceitaFederalClient {
    /// Client against the production gateway.
    pub fn new(client: Client, token: impl Into<String>, metrics: BureauMetrics) -> Self {
        Self {
            client,
            base_url: RECEITA_FEDERAL_BASE_URL.to_string(),
            token: token.into(),
            metrics,
        }
    }

    /// Point the client at another gateway (homologation, local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a client with its own connection pool and the configured timeout.
    pub fn from_config(config: &Config, metrics: BureauMetrics) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.bureau_timeout).build()?;
        Ok(Self::new(client, config.receita_federal_token.clone(), metrics)
            .with_base_url(config.receita_federal_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn company_url(&self, cnpj: &str) -> String {
        format!("{}/api-cnpj-empresa/v2/empresa/{}", self.base_url, cnpj)
    }

    fn record(&self, status: StatusCode, elapsed: Duration) {
        self.metrics
            .record(status.as_str(), BUREAU_NAME, elapsed.as_secs_f64());
    }
}

#[async_trait]
impl BureauService for ReceitaFederalClient {
    async fn fetch(&self, cnpj: &str, cpf: &str) -> Result<Empresa, BureauError> {
        let url = self.company_url(cnpj);

        let request = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(REQUESTER_HEADER, cpf)
            .header(ACCEPT, "application/json");

        let started = Instant::now();
        let response = request.send().await.map_err(|source| {
            tracing::warn!(%url, error = %source, "Receita Federal request failed");
            BureauError::Transport {
                bureau: DISPLAY_NAME,
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let elapsed = started.elapsed();
        self.record(status, elapsed);
        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Receita Federal responded"
        );

        // `response` is dropped on every return below, releasing the connection
        if status != StatusCode::OK {
            return Err(BureauError::UnexpectedStatus {
                bureau: DISPLAY_NAME,
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|source| {
            tracing::warn!(%url, error = %source, "Receita Federal body read failed");
            BureauError::Decode {
                bureau: DISPLAY_NAME,
                source: Box::new(source),
            }
        })?;

        serde_json::from_slice(&body).map_err(|source| BureauError::Decode {
            bureau: DISPLAY_NAME,
            source: Box::new(source),
        })
    }
}
